pub mod classify;
pub mod guard;
pub mod matcher;
pub mod normalize;
pub mod reconciler;
pub mod report;
pub mod schema;

pub use reconciler::{reconcile, Reconciler};
pub use report::{ReportSheet, ReportValue, SheetRow};
