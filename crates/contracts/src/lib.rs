//! Shared types for the SEO dashboard: aggregates, DTOs and the SEO scoring rules.
//!
//! Used by the frontend for typed API calls and for client-side score previews.

pub mod domain;
pub mod shared;
pub mod usecases;
