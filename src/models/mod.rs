pub mod bill;
pub mod result;

pub use bill::{
    BillInput, EntryType, ProjectFunding, StateTriple, DEFAULT_ALREADY_PAID_DESC, STATES,
};
pub use result::{BillResult, BillRow, KEY_FIGURE_ROWS, ROW_COUNT, SECTION_HEADER_ROW};
