pub mod progress;
pub mod request;

pub use progress::{BulkItemError, BulkOperationProgress, BulkOperationStatus};
pub use request::{BulkAction, BulkOperationRequest, BulkOperationResponse};
