pub mod erp;
pub mod invoice;
pub mod result;
pub mod table;

pub use erp::{ErpEntry, ErpRecord};
pub use invoice::InvoiceLine;
pub use result::{
    ClassifiedRow, MatchedRow, NewProductRow, PriceChangeRow, PriceDiff, ReconcileStats,
    ReconciliationResult, Status, SummaryRow,
};
pub use table::{Cell, Table};
