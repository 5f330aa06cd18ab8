use contracts::domain::a001_collection::{
    Collection, CollectionDto, CollectionListQuery, CollectionListResponse, PublishRequest,
    SeoScoreUpdate,
};
use contracts::domain::common::AggregateRoot;

use crate::shared::http::{self, with_query, ApiError};

fn collection_path(id: &str) -> String {
    format!("{}/{}", Collection::api_path(), urlencoding::encode(id))
}

/// Fetch a page of collections matching `query`
pub async fn fetch_collections(
    query: &CollectionListQuery,
) -> Result<CollectionListResponse, ApiError> {
    let path = with_query(&Collection::api_path(), &query.clone().normalized())?;
    http::get_json(&path).await
}

/// Get collection by ID
pub async fn fetch_by_id(id: &str) -> Result<Collection, ApiError> {
    http::get_json(&collection_path(id)).await
}

/// Create new collection
pub async fn create(dto: &CollectionDto) -> Result<Collection, ApiError> {
    http::post_json(&Collection::api_path(), dto).await
}

/// Update existing collection
pub async fn update(id: &str, dto: &CollectionDto) -> Result<Collection, ApiError> {
    http::put_json(&collection_path(id), dto).await
}

/// Validate, attach the client-side SEO score and create or update
pub async fn save(dto: CollectionDto) -> Result<Collection, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    let dto = dto.with_computed_seo();
    match dto.id.clone() {
        Some(id) => update(&id, &dto).await,
        None => create(&dto).await,
    }
}

/// Delete collection
pub async fn delete(id: &str) -> Result<(), ApiError> {
    http::delete(&collection_path(id)).await
}

/// Publish or unpublish collection
pub async fn set_published(id: &str, is_published: bool) -> Result<Collection, ApiError> {
    http::post_json(
        &format!("{}/publish", collection_path(id)),
        &PublishRequest { is_published },
    )
    .await
}

/// Store a score computed elsewhere
pub async fn update_seo_score(id: &str, update: &SeoScoreUpdate) -> Result<Collection, ApiError> {
    http::patch_json(&format!("{}/seo", collection_path(id)), update).await
}

/// Re-score the stored collection from its current fields
pub async fn recalculate_seo(id: &str) -> Result<Collection, ApiError> {
    let mut collection = fetch_by_id(id).await?;
    let update = collection.refresh_seo();
    log::debug!(
        "collection {} rescored: {} ({})",
        id,
        update.seo_score,
        update.seo_status
    );
    update_seo_score(id, &update).await
}
