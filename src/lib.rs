pub mod adapter;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{AdapterError, ReconcileError, TableKind};
pub use models::{Cell, ReconciliationResult, Status, Table};
pub use service::{reconcile, Reconciler};
