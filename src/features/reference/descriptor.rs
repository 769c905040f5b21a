//! Static description of a reference table.
//!
//! Every entity served by this application (countries, banks, religions, ...)
//! is declared once as an [`EntityDescriptor`]. The service, the store and the
//! spreadsheet codec are written against descriptors, never against a
//! concrete entity.

/// Audit columns that may be used for sorting next to the natural fields.
pub const AUDIT_SORT_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// One natural (business) column.
#[derive(Debug)]
pub struct FieldSpec {
    /// Column name, also the JSON key
    pub name: &'static str,
    /// Header text used in exported spreadsheets
    pub label: &'static str,
    /// Maximum length in characters
    pub max_len: u64,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, max_len: u64) -> Self {
        Self {
            name,
            label,
            max_len,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, max_len: u64) -> Self {
        Self {
            name,
            label,
            max_len,
            required: false,
        }
    }
}

/// Reference from a child entity to its parent (e.g. city -> province).
#[derive(Debug)]
pub struct RelationSpec {
    /// JSON key of the embedded projection, e.g. `province`
    pub name: &'static str,
    /// Column holding the parent id, e.g. `province_id`
    pub field: &'static str,
    /// Path segment used for drill-down, e.g. `by-province`
    pub route: &'static str,
    pub target: &'static EntityDescriptor,
}

#[derive(Debug)]
pub struct EntityDescriptor {
    /// URL group, e.g. `region`
    pub group: &'static str,
    /// URL segment, e.g. `countries`
    pub segment: &'static str,
    /// Used for export file names and log lines, e.g. `Countries`
    pub title: &'static str,
    pub table: &'static str,
    /// Natural fields in import/export column order (after the id column)
    pub fields: &'static [FieldSpec],
    /// Columns matched by the free-text filter
    pub searchable: &'static [&'static str],
    /// Columns returned by the search endpoint
    pub search_fields: &'static [&'static str],
    /// Columns embedded when another entity references this one
    pub relation_fields: &'static [&'static str],
    pub relations: &'static [RelationSpec],
    /// Columns that are unique together; enforced by the store
    pub natural_key: &'static [&'static str],
    pub default_sort: &'static str,
}

impl EntityDescriptor {
    /// Route prefix, e.g. `/api/region/countries`
    pub fn base_path(&self) -> String {
        format!("/api/{}/{}", self.group, self.segment)
    }

    pub fn export_file_name(&self) -> String {
        format!("{}.xlsx", self.title)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Resolve a client-supplied sort column to its static name.
    pub fn sort_column(&self, requested: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .map(|f| f.name)
            .chain(AUDIT_SORT_COLUMNS)
            .find(|column| *column == requested)
    }

    /// Spreadsheet header row: the id column followed by every field label.
    pub fn export_headers(&self) -> Vec<&'static str> {
        std::iter::once("ID")
            .chain(self.fields.iter().map(|f| f.label))
            .collect()
    }
}
