use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reference::descriptor::{EntityDescriptor, RelationSpec};
use crate::features::reference::dtos::{EntityPayload, ImportSummaryDto};
use crate::features::reference::models::{FieldValues, Projection, Record};
use crate::features::reference::store::{PageRequest, ReferenceStore, Scope, SortDirection};
use crate::modules::spreadsheet::{self, SheetRow};
use crate::shared::validation::field_messages;

type IdGenerator = Arc<dyn Fn() -> Uuid + Send + Sync>;
type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// One service instance serves every reference entity; callers pass the
/// descriptor of the table they want.
pub struct ReferenceService {
    store: Arc<dyn ReferenceStore>,
    new_id: IdGenerator,
    now: Clock,
}

impl ReferenceService {
    pub fn new(store: Arc<dyn ReferenceStore>) -> Self {
        Self {
            store,
            new_id: Arc::new(Uuid::new_v4),
            now: Arc::new(|| Utc::now().timestamp_millis()),
        }
    }

    #[cfg(test)]
    pub fn with_id_generator(mut self, new_id: impl Fn() -> Uuid + Send + Sync + 'static) -> Self {
        self.new_id = Arc::new(new_id);
        self
    }

    #[cfg(test)]
    pub fn with_clock(mut self, now: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.now = Arc::new(now);
        self
    }

    // ==================== Reads ====================

    /// A page of active (or trashed) rows with parent relations resolved,
    /// plus the independently counted size of the whole set.
    pub async fn list(
        &self,
        entity: &'static EntityDescriptor,
        scope: Scope,
        request: &PageRequest,
    ) -> Result<(Vec<Record>, i64)> {
        let mut rows = self
            .store
            .fetch_page(entity, scope, request, &entity.field_names())
            .await?;
        self.attach_relations(entity, &mut rows).await?;

        let total = self.count(entity, scope).await?;
        Ok((rows, total))
    }

    /// Same filter, sort and paging as [`list`](Self::list) over active rows,
    /// loading only the search projection columns.
    pub async fn search(
        &self,
        entity: &'static EntityDescriptor,
        request: &PageRequest,
    ) -> Result<Vec<Projection>> {
        let rows = self
            .store
            .fetch_page(entity, Scope::Active, request, entity.search_fields)
            .await?;

        Ok(rows
            .iter()
            .map(|r| r.project(entity.search_fields))
            .collect())
    }

    pub async fn count(&self, entity: &'static EntityDescriptor, scope: Scope) -> Result<i64> {
        self.store.count(entity, scope).await
    }

    /// An active row by id, relations resolved.
    pub async fn get(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<Record> {
        let mut record = self
            .store
            .fetch_one(entity, id, Scope::Active)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        for relation in entity.relations {
            let parent = match Uuid::parse_str(record.value(relation.field)) {
                Ok(parent_id) => self.relation(relation.target, parent_id).await?,
                Err(_) => None,
            };
            record.relations.insert(relation.name, parent);
        }
        Ok(record)
    }

    /// The embedded projection other entities show for this row.
    pub async fn relation(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
    ) -> Result<Option<Projection>> {
        let rows = self
            .store
            .fetch_many(entity, &[id], entity.relation_fields)
            .await?;
        Ok(rows.first().map(|r| r.project(entity.relation_fields)))
    }

    /// Active children of one parent, as search projections.
    pub async fn by_parent(
        &self,
        entity: &'static EntityDescriptor,
        relation: &'static RelationSpec,
        parent_id: &str,
    ) -> Result<Vec<Projection>> {
        let rows = self
            .store
            .fetch_by_field(entity, relation.field, parent_id, entity.search_fields)
            .await?;

        Ok(rows
            .iter()
            .map(|r| r.project(entity.search_fields))
            .collect())
    }

    /// Resolve every parent reference of a page with one lookup per relation.
    async fn attach_relations(
        &self,
        entity: &'static EntityDescriptor,
        rows: &mut [Record],
    ) -> Result<()> {
        for relation in entity.relations {
            let ids: Vec<Uuid> = rows
                .iter()
                .filter_map(|r| Uuid::parse_str(r.value(relation.field)).ok())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let target = relation.target;
            let parents: HashMap<Uuid, Projection> = self
                .store
                .fetch_many(target, &ids, target.relation_fields)
                .await?
                .iter()
                .map(|p| (p.id, p.project(target.relation_fields)))
                .collect();

            for row in rows.iter_mut() {
                let parent = Uuid::parse_str(row.value(relation.field))
                    .ok()
                    .and_then(|id| parents.get(&id).cloned());
                row.relations.insert(relation.name, parent);
            }
        }

        Ok(())
    }

    // ==================== Mutations ====================

    /// A random id not used by any row of the table, active or trashed.
    pub async fn ensure_unique_id(&self, entity: &'static EntityDescriptor) -> Result<Uuid> {
        loop {
            let id = (self.new_id)();
            if !self.store.exists(entity, id).await? {
                return Ok(id);
            }
            tracing::warn!("Generated id {} already used in {}, retrying", id, entity.table);
        }
    }

    pub async fn create(
        &self,
        entity: &'static EntityDescriptor,
        values: FieldValues,
    ) -> Result<Record> {
        let id = self.ensure_unique_id(entity).await?;
        self.store
            .insert(entity, &Record::new(id, values, (self.now)()))
            .await?;

        tracing::info!("Created {} {}", entity.table, id);
        self.get(entity, id).await
    }

    /// Last writer wins; `created_at` is never touched.
    pub async fn update(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        values: FieldValues,
    ) -> Result<Record> {
        if self.store.fetch_one(entity, id, Scope::Active).await?.is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }

        self.store.update(entity, id, &values, (self.now)()).await?;
        self.get(entity, id).await
    }

    /// Soft delete. Deleting a trashed row re-stamps `deleted_at`.
    pub async fn delete(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<()> {
        let touched = self.store.soft_delete(entity, id, (self.now)()).await?;
        if touched == 0 {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!("Moved {} {} to trash", entity.table, id);
        Ok(())
    }

    /// Clears `deleted_at`. Restoring an active row is a no-op success.
    pub async fn restore(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<()> {
        let touched = self.store.restore(entity, id).await?;
        if touched == 0 {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!("Restored {} {}", entity.table, id);
        Ok(())
    }

    // ==================== Spreadsheets ====================

    /// Read an uploaded workbook and upsert its rows.
    pub async fn import_file(
        &self,
        entity: &'static EntityDescriptor,
        path: PathBuf,
    ) -> Result<ImportSummaryDto> {
        let rows = tokio::task::spawn_blocking(move || spreadsheet::read_rows(&path))
            .await
            .map_err(|e| AppError::Internal(format!("Import reader task failed: {}", e)))??;

        self.import_rows(entity, rows).await
    }

    /// Upsert rows one at a time. A non-empty id column updates the row with
    /// that id when it exists (trashed rows included) and otherwise inserts
    /// under that id; an empty id column inserts under a fresh id.
    ///
    /// Rows are not wrapped in a transaction: the first failing row aborts the
    /// import and rows before it stay committed.
    pub async fn import_rows(
        &self,
        entity: &'static EntityDescriptor,
        rows: Vec<SheetRow>,
    ) -> Result<ImportSummaryDto> {
        let mut summary = ImportSummaryDto::default();

        for row in rows {
            self.import_row(entity, &row, &mut summary)
                .await
                .map_err(|e| {
                    tracing::warn!(
                        "Import into {} stopped at row {}: {}",
                        entity.table,
                        row.number,
                        e
                    );
                    prefix_row(row.number, e)
                })?;
        }

        tracing::info!(
            "Imported {}: {} inserted, {} updated",
            entity.table,
            summary.inserted,
            summary.updated
        );
        Ok(summary)
    }

    async fn import_row(
        &self,
        entity: &'static EntityDescriptor,
        row: &SheetRow,
        summary: &mut ImportSummaryDto,
    ) -> Result<()> {
        let id_cell = row.cells.first().map(|c| c.trim()).unwrap_or("");
        let field_cells = row.cells.get(1..).unwrap_or(&[]);

        let payload = EntityPayload::from_cells(entity, field_cells);
        payload
            .validate()
            .map_err(|e| AppError::Validation(field_messages(&e)))?;
        let values = payload.into_values();
        let now = (self.now)();

        if id_cell.is_empty() {
            let id = self.ensure_unique_id(entity).await?;
            self.store
                .insert(entity, &Record::new(id, values, now))
                .await?;
            summary.inserted += 1;
            return Ok(());
        }

        let id = Uuid::parse_str(id_cell).map_err(|_| {
            let mut fields = crate::shared::types::FieldMessages::new();
            fields.insert("id".to_string(), "id is invalid.".to_string());
            AppError::Validation(fields)
        })?;

        let existing = self.store.fetch_one(entity, id, Scope::Any).await?;
        if existing.is_some() {
            self.store.update(entity, id, &values, now).await?;
            summary.updated += 1;
        } else {
            self.store
                .insert(entity, &Record::new(id, values, now))
                .await?;
            summary.inserted += 1;
        }
        Ok(())
    }

    /// Every active row, sorted by the default column, as an xlsx workbook.
    /// Request-time filters and paging never apply here.
    pub async fn export(&self, entity: &'static EntityDescriptor) -> Result<Vec<u8>> {
        let total = self.count(entity, Scope::Active).await?;
        let request = PageRequest {
            filter: String::new(),
            sort_by: entity.default_sort,
            direction: SortDirection::Asc,
            page: 1,
            page_size: total.max(1),
        };

        let columns = entity.field_names();
        let records = self
            .store
            .fetch_page(entity, Scope::Active, &request, &columns)
            .await?;

        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                std::iter::once(r.id.to_string())
                    .chain(columns.iter().map(|c| r.value(c).to_string()))
                    .collect()
            })
            .collect();

        tracing::info!("Exporting {} rows of {}", rows.len(), entity.table);
        spreadsheet::write_table(&entity.export_headers(), &rows)
    }
}

/// Tag validation messages with the spreadsheet row they came from.
fn prefix_row(number: usize, err: AppError) -> AppError {
    match err {
        AppError::Validation(fields) => AppError::Validation(
            fields
                .into_iter()
                .map(|(field, message)| (field, format!("Row {}: {}", number, message)))
                .collect(),
        ),
        other => other,
    }
}
