use hartron_bill_rust::models::{BillInput, EntryType, ProjectFunding};
use hartron_bill_rust::service::{calculate, distribute_proportionally, try_calculate, unit_figures};
use proptest::prelude::*;

fn entry_type() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::BaseValue), Just(EntryType::ProductValue)]
}

fn funding() -> impl Strategy<Value = ProjectFunding> {
    prop_oneof![Just(ProjectFunding::StateGovt), Just(ProjectFunding::ECommittee)]
}

fn triple(max: f64) -> impl Strategy<Value = [f64; 3]> {
    [0.0..max, 0.0..max, 0.0..max]
}

prop_compose! {
    fn bill_input()(
        entry_type in entry_type(),
        value_per_unit in 0.0..1_000_000.0f64,
        gst_percent in 0.0..100.0f64,
        project_funding in funding(),
        quantities in triple(10_000.0),
        penalties in triple(50_000.0),
        already_paid in triple(100_000.0),
    ) -> BillInput {
        BillInput {
            entry_type,
            value_per_unit,
            gst_percent,
            project_funding,
            quantities,
            penalties,
            already_paid,
            already_paid_desc: "Amount already available with HARTRON".to_string(),
        }
    }
}

proptest! {
    #[test]
    fn every_row_total_is_the_sum_of_its_values(input in bill_input()) {
        let result = calculate(&input);
        prop_assert_eq!(result.rows.len(), 16);
        for row in &result.rows {
            prop_assert_eq!(row.total, row.values[0] + row.values[1] + row.values[2]);
        }
    }

    #[test]
    fn payment_and_withdraw_follow_from_deductions(input in bill_input()) {
        let r = calculate(&input);
        for i in 0..3 {
            let total = r.rows[6].values[i];
            let deduction = r.rows[13].values[i];
            let payment = r.rows[14].values[i];
            prop_assert_eq!(payment, total - deduction);

            let expected = payment + r.rows[8].values[i] + r.rows[9].values[i] + r.rows[10].values[i];
            prop_assert_eq!(r.rows[15].values[i], expected);
        }
    }

    #[test]
    fn validated_input_yields_finite_rows(input in bill_input()) {
        prop_assert!(input.validate().is_ok());
        for row in &calculate(&input).rows {
            prop_assert!(row.values.iter().all(|v| v.is_finite()));
            prop_assert!(row.total.is_finite());
        }
    }

    #[test]
    fn accepted_results_are_always_finite(
        value_per_unit in 0.0..f64::MAX,
        quantity in 0.0..f64::MAX,
        gst_percent in 0.0..100.0f64,
    ) {
        let input = BillInput {
            value_per_unit,
            gst_percent,
            quantities: [quantity, 1.0, 0.0],
            ..BillInput::default()
        };
        if let Ok(result) = try_calculate(&input) {
            for row in &result.rows {
                prop_assert!(row.values.iter().all(|v| v.is_finite()));
                prop_assert!(row.total.is_finite());
            }
        }
    }

    #[test]
    fn base_value_survives_product_value_round_trip(
        bv in 0.0..1_000_000.0f64,
        gst in 0.0..100.0f64,
    ) {
        let forward = unit_figures(&BillInput {
            value_per_unit: bv,
            gst_percent: gst,
            ..BillInput::default()
        });
        let back = unit_figures(&BillInput {
            entry_type: EntryType::ProductValue,
            value_per_unit: forward.product_value,
            gst_percent: gst,
            ..BillInput::default()
        });
        // 相对误差 1e-9
        prop_assert!((back.base_value - bv).abs() <= 1e-9 * bv.max(1.0));
    }

    #[test]
    fn rows_are_reproducible(input in bill_input()) {
        let a = calculate(&input);
        let b = calculate(&input);
        for (x, y) in a.rows.iter().zip(&b.rows) {
            for i in 0..3 {
                prop_assert_eq!(x.values[i].to_bits(), y.values[i].to_bits());
            }
        }
    }

    #[test]
    fn distribution_stays_within_rounding_of_total(
        total in 0.0..10_000_000.0f64,
        quantities in triple(1_000.0),
    ) {
        let shares = distribute_proportionally(total, &quantities);
        let sum_q: f64 = quantities.iter().sum();
        if sum_q > 0.0 {
            let sum: f64 = shares.iter().sum();
            prop_assert!((sum - total).abs() <= 0.015 + total * 1e-12);
        } else {
            prop_assert_eq!(shares, [0.0; 3]);
        }
    }
}
