pub mod aggregate;

pub use aggregate::{
    normalize_keywords, Collection, CollectionDto, CollectionId, CollectionListQuery,
    CollectionListResponse, CollectionType, PublishRequest, SeoScoreUpdate,
};
