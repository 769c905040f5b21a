use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field name to human readable reason, as returned in 422 responses.
pub type FieldMessages = BTreeMap<String, String>;

/// Either a plain status message or a per-field validation report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Fields(FieldMessages),
}

/// Envelope shared by every JSON endpoint: `{ error, data, message }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub error: bool,
    pub data: Option<T>,
    pub message: Message,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            error: false,
            data,
            message: Message::Text(message.into()),
        }
    }

    pub fn failed(message: Message) -> ApiResponse<()> {
        ApiResponse {
            error: true,
            data: None,
            message,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Metadata {
    pub page: i64,
    pub per_page: i64,
    /// Number of rows in this page
    pub sub_total: i64,
    /// Size of the whole active (or trashed) set, counted separately
    pub total: i64,
}

/// Body of list endpoints: `{ data: rows, metadata }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub metadata: Metadata,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        let sub_total = data.len() as i64;
        Self {
            data,
            metadata: Metadata {
                page,
                per_page,
                sub_total,
                total,
            },
        }
    }
}
