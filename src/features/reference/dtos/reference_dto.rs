use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateLength, ValidationError, ValidationErrors};

use crate::core::error::{AppError, Result};
use crate::features::reference::descriptor::EntityDescriptor;
use crate::features::reference::models::FieldValues;
use crate::features::reference::store::{PageRequest, SortDirection};
use crate::shared::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::{
    field_messages, validate_numeric, CODE_INVALID, CODE_MAX, CODE_REQUIRED,
};

/// Query parameters shared by list, trash and search endpoints.
///
/// Everything arrives as text so that malformed numbers surface as a 422
/// report rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
pub struct ListQuery {
    /// Free-text substring match over the entity's searchable columns
    pub filter: Option<String>,
    /// Column to sort by (defaults to the entity's natural display column)
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_direction: Option<String>,
    /// Page number, 1-indexed
    #[validate(custom(function = "validate_numeric"))]
    pub page: Option<String>,
    /// Rows per page (default: 10)
    #[validate(custom(function = "validate_numeric"))]
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Check and resolve the raw parameters against an entity.
    pub fn resolve(&self, entity: &EntityDescriptor) -> Result<PageRequest> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let page = parse_positive(
            self.page.as_deref(),
            DEFAULT_PAGE,
            MAX_PAGE,
            "page",
            &mut errors,
        );
        let page_size = parse_positive(
            self.page_size.as_deref(),
            DEFAULT_PAGE_SIZE,
            i64::MAX,
            "page_size",
            &mut errors,
        )
        .min(MAX_PAGE_SIZE);

        let sort_by = match self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            None => Some(entity.default_sort),
            Some(requested) => entity.sort_column(requested),
        };
        if sort_by.is_none() {
            errors.add("sort_by", ValidationError::new(CODE_INVALID));
        }

        let direction = match self.sort_direction.as_deref().filter(|s| !s.is_empty()) {
            None => Some(SortDirection::Asc),
            Some(raw) => SortDirection::parse(raw),
        };
        if direction.is_none() {
            errors.add("sort_direction", ValidationError::new(CODE_INVALID));
        }

        match (sort_by, direction) {
            (Some(sort_by), Some(direction)) if errors.is_empty() => Ok(PageRequest {
                filter: self.filter.clone().unwrap_or_default(),
                sort_by,
                direction,
                page,
                page_size,
            }),
            _ => Err(AppError::Validation(field_messages(&errors))),
        }
    }
}

/// Highest page whose row offset still fits in an `i64` at the largest page size.
const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Numeric-format errors are already reported by `validate`; this only adds
/// the bounds.
fn parse_positive(
    raw: Option<&str>,
    default: i64,
    max: i64,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> i64 {
    match raw.filter(|s| !s.is_empty()) {
        None => default,
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) if (1..=max).contains(&value) => value,
            Ok(_) => {
                errors.add(field, ValidationError::new(CODE_INVALID));
                default
            }
            Err(_) => default,
        },
    }
}

/// Natural field values for one entity, taken from a JSON body or a
/// spreadsheet row, checked against the descriptor's constraints.
#[derive(Debug, Clone)]
pub struct EntityPayload {
    entity: &'static EntityDescriptor,
    values: FieldValues,
    malformed: Vec<&'static str>,
}

impl EntityPayload {
    /// Strings are taken as-is, numbers are stringified, `null` or a missing
    /// key is an empty value. Anything else is reported as invalid.
    pub fn from_json(entity: &'static EntityDescriptor, body: &Map<String, Value>) -> Self {
        let mut values = FieldValues::new();
        let mut malformed = Vec::new();

        for field in entity.fields {
            let value = match body.get(field.name) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(_) => {
                    malformed.push(field.name);
                    String::new()
                }
            };
            values.insert(field.name, value);
        }

        Self {
            entity,
            values,
            malformed,
        }
    }

    /// Positional cells in descriptor order; missing cells are empty.
    pub fn from_cells(entity: &'static EntityDescriptor, cells: &[String]) -> Self {
        let values = entity
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.name, cells.get(i).cloned().unwrap_or_default()))
            .collect();

        Self {
            entity,
            values,
            malformed: Vec::new(),
        }
    }

    pub fn into_values(self) -> FieldValues {
        self.values
    }
}

impl Validate for EntityPayload {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in self.entity.fields {
            if self.malformed.contains(&field.name) {
                errors.add(field.name, ValidationError::new(CODE_INVALID));
                continue;
            }

            let value = self.values.get(field.name).map(String::as_str).unwrap_or("");
            if value.is_empty() {
                if field.required {
                    errors.add(field.name, ValidationError::new(CODE_REQUIRED));
                }
                continue;
            }

            if !value.validate_length(None, Some(field.max_len), None) {
                let mut error = ValidationError::new(CODE_MAX);
                error.add_param("max".into(), &field.max_len);
                errors.add(field.name, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Outcome of a completed import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ImportSummaryDto {
    pub inserted: usize,
    pub updated: usize,
}

// ==================== OpenAPI documentation shapes ====================
// Rows are serialized from the entity descriptor at runtime; the structs below
// only describe the common envelope for Swagger UI.

/// An entity row. Natural fields and embedded parent projections
/// (e.g. `province: { id, code, name }`) appear next to these keys.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct RecordDto {
    pub id: Uuid,
    /// Unix epoch milliseconds
    pub created_at: i64,
    pub updated_at: i64,
    /// Present only for trashed rows
    pub deleted_at: Option<i64>,
}

/// Lightweight `{ id, code?, name }` projection returned by search and
/// drill-down endpoints.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProjectionDto {
    pub id: Uuid,
    #[schema(example = "32")]
    pub code: Option<String>,
    #[schema(example = "Jawa Barat")]
    pub name: Option<String>,
}

/// Create/update body: the entity's natural fields as a flat JSON object.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct EntityBodyDto {
    #[schema(example = "Jawa Barat")]
    pub name: Option<String>,
    #[schema(example = "32")]
    pub code: Option<String>,
}

/// Import upload form.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImportFileDto {
    /// Workbook whose first row is a header and whose first column is the id
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file_import: String,
}
