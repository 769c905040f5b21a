use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use uuid::Uuid;

/// Natural column values keyed by column name.
pub type FieldValues = BTreeMap<&'static str, String>;

/// One row of a reference table, including audit columns.
///
/// `values` may hold only a subset of the entity's fields when the row was
/// fetched for a projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Uuid,
    pub values: FieldValues,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    /// Parent projections, filled at read time. `None` when the parent id is
    /// empty or no longer resolves.
    pub relations: BTreeMap<&'static str, Option<Projection>>,
}

impl Record {
    pub fn new(id: Uuid, values: FieldValues, now: i64) -> Self {
        Self {
            id,
            values,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            relations: BTreeMap::new(),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Reduce to `id` plus the given columns.
    pub fn project(&self, columns: &[&'static str]) -> Projection {
        Projection {
            id: self.id,
            values: columns
                .iter()
                .map(|c| (*c, self.value(c).to_string()))
                .collect(),
        }
    }
}

/// Lightweight `{ id, ...short fields }` view used by search results,
/// drill-down lists and embedded parent relations.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub id: Uuid,
    pub values: FieldValues,
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        for (key, relation) in &self.relations {
            map.serialize_entry(key, relation)?;
        }
        map.serialize_entry("created_at", &self.created_at)?;
        map.serialize_entry("updated_at", &self.updated_at)?;
        if let Some(deleted_at) = self.deleted_at {
            map.serialize_entry("deleted_at", &deleted_at)?;
        }
        map.end()
    }
}
