//! Persistence seam for reference tables.
//!
//! The service talks to the database only through [`ReferenceStore`], so the
//! handle is injected at startup instead of living in a global.

mod postgres;

pub use postgres::PgReferenceStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reference::descriptor::EntityDescriptor;
use crate::features::reference::models::{FieldValues, Record};

/// Which side of the soft-delete partition a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `deleted_at IS NULL`
    Active,
    /// `deleted_at IS NOT NULL`
    Trashed,
    /// Both; used when import matches rows by id
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Validated list parameters. `sort_by` is always one of the descriptor's
/// own column names.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub filter: String,
    pub sort_by: &'static str,
    pub direction: SortDirection,
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Rows to skip; saturates instead of wrapping.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.page_size.max(0))
    }
}

#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// One page of the filtered, sorted rows. Only `columns` are loaded into
    /// [`Record::values`].
    async fn fetch_page(
        &self,
        entity: &'static EntityDescriptor,
        scope: Scope,
        request: &PageRequest,
        columns: &[&'static str],
    ) -> Result<Vec<Record>>;

    async fn count(&self, entity: &'static EntityDescriptor, scope: Scope) -> Result<i64>;

    async fn fetch_one(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        scope: Scope,
    ) -> Result<Option<Record>>;

    /// Rows with any of the given ids, active or trashed.
    async fn fetch_many(
        &self,
        entity: &'static EntityDescriptor,
        ids: &[Uuid],
        columns: &[&'static str],
    ) -> Result<Vec<Record>>;

    /// Active rows whose `field` equals `value`, in default sort order.
    async fn fetch_by_field(
        &self,
        entity: &'static EntityDescriptor,
        field: &'static str,
        value: &str,
        columns: &[&'static str],
    ) -> Result<Vec<Record>>;

    /// Whether the id is taken, active or trashed.
    async fn exists(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<bool>;

    /// Fails with `AppError::Duplicate` on a natural key collision.
    async fn insert(&self, entity: &'static EntityDescriptor, record: &Record) -> Result<()>;

    /// Returns the number of rows touched.
    async fn update(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        values: &FieldValues,
        updated_at: i64,
    ) -> Result<u64>;

    async fn soft_delete(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        deleted_at: i64,
    ) -> Result<u64>;

    async fn restore(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn test_offset() {
        let mut request = PageRequest {
            filter: String::new(),
            sort_by: "name",
            direction: SortDirection::Asc,
            page: 1,
            page_size: 10,
        };
        assert_eq!(request.offset(), 0);
        request.page = 3;
        assert_eq!(request.offset(), 20);
        request.page = i64::MAX;
        assert_eq!(request.offset(), i64::MAX);
    }
}
