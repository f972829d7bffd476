use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// A course record.
///
/// Only `id` is fixed by the service; every other attribute is
/// caller-supplied and persisted as-is via the flattened document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Document,
}

impl Course {
    /// Build a course from a client-supplied body and a server-assigned id.
    ///
    /// An `id` present in the body is discarded; ids are never
    /// client-assigned.
    pub fn new(id: i64, mut fields: Document) -> Self {
        fields.remove("id");
        Self { id, fields }
    }
}
