use serde::{Deserialize, Serialize};

/// Partition key of the only record the service reads
pub const DEMO_KEY: &str = "demo";

/// Value reported when the record does not exist
pub const NO_VALUE_FOUND: &str = "No value found";

/// A record read from the key-value table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub value: String,
}

/// Response type for successful lookups
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LookupResponse {
    pub value: String,
}
