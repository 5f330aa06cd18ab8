pub mod a001_collection;
pub mod a002_seo_audit;
pub mod common;
