pub mod allocation;
pub mod bill_service;
pub mod calculator;

pub use allocation::{
    distribute_proportionally, format_already_paid_description, AlreadyPaidAllocation,
    AlreadyPaidEntry,
};
pub use bill_service::{BatchItem, BillService};
pub use calculator::{calculate, try_calculate, unit_figures, UnitFigures};
