pub mod aggregate;

pub use aggregate::{
    audit_collection, audit_collections, AuditSummary, CollectionAudit, RunAuditRequest, SeoAudit,
    SeoAuditId,
};
