pub mod api;
pub mod monitor;

pub use monitor::{completion_notice, BulkOperationMonitor};
