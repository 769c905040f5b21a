use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use super::{PageRequest, ReferenceStore, Scope};
use crate::core::error::{AppError, Result};
use crate::features::reference::descriptor::EntityDescriptor;
use crate::features::reference::models::{FieldValues, Record};

/// Postgres-backed store.
///
/// Table and column names are spliced into SQL only from the static
/// descriptors; every client value travels as a bind parameter.
pub struct PgReferenceStore {
    pool: PgPool,
}

impl PgReferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_select<'a>(
    qb: &mut QueryBuilder<'a, Postgres>,
    entity: &EntityDescriptor,
    columns: &[&'static str],
) {
    qb.push("SELECT id");
    for column in columns {
        qb.push(", ").push(*column);
    }
    qb.push(", created_at, updated_at, deleted_at FROM ")
        .push(entity.table);
}

fn push_scope<'a>(qb: &mut QueryBuilder<'a, Postgres>, scope: Scope) {
    match scope {
        Scope::Active => qb.push(" WHERE deleted_at IS NULL"),
        Scope::Trashed => qb.push(" WHERE deleted_at IS NOT NULL"),
        Scope::Any => qb.push(" WHERE TRUE"),
    };
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn decode(row: &PgRow, columns: &[&'static str]) -> std::result::Result<Record, sqlx::Error> {
    let mut values = FieldValues::new();
    for column in columns {
        values.insert(*column, row.try_get::<String, _>(*column)?);
    }
    Ok(Record {
        id: row.try_get("id")?,
        values,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
        relations: Default::default(),
    })
}

fn decode_all(rows: &[PgRow], columns: &[&'static str]) -> Result<Vec<Record>> {
    rows.iter()
        .map(|row| decode(row, columns).map_err(AppError::from))
        .collect()
}

#[async_trait]
impl ReferenceStore for PgReferenceStore {
    async fn fetch_page(
        &self,
        entity: &'static EntityDescriptor,
        scope: Scope,
        request: &PageRequest,
        columns: &[&'static str],
    ) -> Result<Vec<Record>> {
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_select(&mut qb, entity, columns);
        push_scope(&mut qb, scope);

        if !request.filter.is_empty() && !entity.searchable.is_empty() {
            let pattern = like_pattern(&request.filter);
            qb.push(" AND (");
            for (i, column) in entity.searchable.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
            }
            qb.push(")");
        }

        qb.push(" ORDER BY ")
            .push(request.sort_by)
            .push(" ")
            .push(request.direction.as_sql())
            .push(", id ASC LIMIT ")
            .push_bind(request.page_size)
            .push(" OFFSET ")
            .push_bind(request.offset());

        let rows = qb.build().fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to list {}: {:?}", entity.table, e);
            AppError::from(e)
        })?;

        decode_all(&rows, columns)
    }

    async fn count(&self, entity: &'static EntityDescriptor, scope: Scope) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        qb.push(entity.table);
        push_scope(&mut qb, scope);

        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {}: {:?}", entity.table, e);
                AppError::from(e)
            })?;

        Ok(total)
    }

    async fn fetch_one(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        scope: Scope,
    ) -> Result<Option<Record>> {
        let columns = entity.field_names();
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_select(&mut qb, entity, &columns);
        push_scope(&mut qb, scope);
        qb.push(" AND id = ").push_bind(id);

        let row = qb.build().fetch_optional(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to fetch {} {}: {:?}", entity.table, id, e);
            AppError::from(e)
        })?;

        row.map(|r| decode(&r, &columns).map_err(AppError::from))
            .transpose()
    }

    async fn fetch_many(
        &self,
        entity: &'static EntityDescriptor,
        ids: &[Uuid],
        columns: &[&'static str],
    ) -> Result<Vec<Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Postgres>::new("");
        push_select(&mut qb, entity, columns);
        qb.push(" WHERE id = ANY(").push_bind(ids.to_vec()).push(")");

        let rows = qb.build().fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to resolve {} relations: {:?}", entity.table, e);
            AppError::from(e)
        })?;

        decode_all(&rows, columns)
    }

    async fn fetch_by_field(
        &self,
        entity: &'static EntityDescriptor,
        field: &'static str,
        value: &str,
        columns: &[&'static str],
    ) -> Result<Vec<Record>> {
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_select(&mut qb, entity, columns);
        push_scope(&mut qb, Scope::Active);
        qb.push(" AND ")
            .push(field)
            .push(" = ")
            .push_bind(value.to_string())
            .push(" ORDER BY ")
            .push(entity.default_sort)
            .push(" ASC, id ASC");

        let rows = qb.build().fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to list {} by {}: {:?}", entity.table, field, e);
            AppError::from(e)
        })?;

        decode_all(&rows, columns)
    }

    async fn exists(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<bool> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT EXISTS(SELECT 1 FROM ");
        qb.push(entity.table)
            .push(" WHERE id = ")
            .push_bind(id)
            .push(")");

        let exists = qb
            .build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert(&self, entity: &'static EntityDescriptor, record: &Record) -> Result<()> {
        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO ");
        qb.push(entity.table).push(" (id");
        for field in entity.fields {
            qb.push(", ").push(field.name);
        }
        qb.push(", created_at, updated_at) VALUES (");

        let mut values = qb.separated(", ");
        values.push_bind(record.id);
        for field in entity.fields {
            values.push_bind(record.value(field.name).to_string());
        }
        values.push_bind(record.created_at);
        values.push_bind(record.updated_at);
        values.push_unseparated(")");

        qb.build().execute(&self.pool).await.map_err(|e| {
            let err = AppError::from(e);
            if !matches!(err, AppError::Duplicate) {
                tracing::error!("Failed to insert into {}: {:?}", entity.table, err);
            }
            err
        })?;

        Ok(())
    }

    async fn update(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        values: &FieldValues,
        updated_at: i64,
    ) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
        qb.push(entity.table).push(" SET ");

        let mut assignments = qb.separated(", ");
        for field in entity.fields {
            let value = values.get(field.name).cloned().unwrap_or_default();
            assignments.push(field.name);
            assignments.push_unseparated(" = ");
            assignments.push_bind_unseparated(value);
        }
        assignments.push("updated_at = ");
        assignments.push_bind_unseparated(updated_at);

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await.map_err(|e| {
            let err = AppError::from(e);
            if !matches!(err, AppError::Duplicate) {
                tracing::error!("Failed to update {} {}: {:?}", entity.table, id, err);
            }
            err
        })?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        deleted_at: i64,
    ) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
        qb.push(entity.table)
            .push(" SET deleted_at = ")
            .push_bind(deleted_at)
            .push(" WHERE id = ")
            .push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn restore(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
        qb.push(entity.table)
            .push(" SET deleted_at = NULL WHERE id = ")
            .push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("jawa"), "%jawa%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
