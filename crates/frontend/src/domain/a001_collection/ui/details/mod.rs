pub mod model;
pub mod view_model;

pub use model::{slugify, CollectionFormDto};
pub use view_model::CollectionDetailsVm;
