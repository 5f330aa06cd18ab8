use contracts::usecases::u501_bulk_operation::{
    BulkOperationProgress, BulkOperationRequest, BulkOperationResponse,
};

use crate::shared::api_utils::api_url;
use crate::shared::http::{self, ApiError};

const BULK_OPERATIONS_PATH: &str = "/api/bulk_operations";

fn operation_path(operation_id: &str) -> String {
    format!("{}/{}", BULK_OPERATIONS_PATH, urlencoding::encode(operation_id))
}

fn stream_path(operation_id: &str) -> String {
    format!("{}/stream", operation_path(operation_id))
}

/// Запустить массовую операцию
pub async fn start(request: &BulkOperationRequest) -> Result<BulkOperationResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    http::post_json(BULK_OPERATIONS_PATH, request).await
}

/// Получить прогресс операции
pub async fn get_progress(operation_id: &str) -> Result<BulkOperationProgress, ApiError> {
    http::get_json(&operation_path(operation_id)).await
}

/// Запросить отмену; возвращает прогресс на момент отмены
pub async fn cancel(operation_id: &str) -> Result<BulkOperationProgress, ApiError> {
    let body = serde_json::Value::Object(serde_json::Map::new());
    http::post_json(&format!("{}/cancel", operation_path(operation_id)), &body).await
}

/// Absolute URL of the server-sent progress stream
pub fn stream_url(operation_id: &str) -> String {
    api_url(&stream_path(operation_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(operation_path("op-1"), "/api/bulk_operations/op-1");
        assert_eq!(stream_path("op 1"), "/api/bulk_operations/op%201/stream");
    }
}
