use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use uuid::Uuid;

use crate::core::config::ScratchConfig;
use crate::core::error::{AppError, Result};
use crate::core::router::api_router;
use crate::features::reference::descriptor::EntityDescriptor;
use crate::features::reference::models::{FieldValues, Record};
use crate::features::reference::store::{
    PageRequest, ReferenceStore, Scope, SortDirection,
};
use crate::features::reference::ReferenceService;
use crate::modules::storage::ScratchStorage;

/// First timestamp handed out by [`ticking_clock`].
pub const CLOCK_START: i64 = 1_700_000_000_000;

/// In-memory [`ReferenceStore`] with the same uniqueness rules as the
/// Postgres schema: primary key and natural key are unique across active and
/// trashed rows.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Record>>>,
    failing: Mutex<Option<&'static str>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call touching `table` fail like a lost connection.
    pub fn fail_table(&self, table: &'static str) {
        *self.failing.lock().unwrap() = Some(table);
    }

    /// Raw rows of a table, trashed included, in insertion order.
    pub fn rows(&self, entity: &EntityDescriptor) -> Vec<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(entity.table)
            .cloned()
            .unwrap_or_default()
    }

    /// Insert a row directly, bypassing validation.
    pub fn seed(&self, entity: &EntityDescriptor, pairs: &[(&'static str, &str)]) -> Record {
        let values: FieldValues = entity
            .fields
            .iter()
            .map(|f| {
                let value = pairs
                    .iter()
                    .find(|(k, _)| *k == f.name)
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_default();
                (f.name, value)
            })
            .collect();
        let record = Record::new(Uuid::new_v4(), values, CLOCK_START);
        self.tables
            .lock()
            .unwrap()
            .entry(entity.table)
            .or_default()
            .push(record.clone());
        record
    }

    fn check(&self, entity: &EntityDescriptor) -> Result<()> {
        if *self.failing.lock().unwrap() == Some(entity.table) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn in_scope(record: &Record, scope: Scope) -> bool {
    match scope {
        Scope::Active => record.deleted_at.is_none(),
        Scope::Trashed => record.deleted_at.is_some(),
        Scope::Any => true,
    }
}

fn compare(a: &Record, b: &Record, column: &str) -> Ordering {
    match column {
        "created_at" => a.created_at.cmp(&b.created_at),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        _ => a.value(column).cmp(b.value(column)),
    }
}

fn keep_columns(record: &Record, columns: &[&'static str]) -> Record {
    let mut copy = record.clone();
    copy.values.retain(|k, _| columns.contains(k));
    copy
}

fn natural_key(entity: &EntityDescriptor, values: &FieldValues) -> Vec<String> {
    entity
        .natural_key
        .iter()
        .map(|k| values.get(k).cloned().unwrap_or_default())
        .collect()
}

#[async_trait]
impl ReferenceStore for MemoryStore {
    async fn fetch_page(
        &self,
        entity: &'static EntityDescriptor,
        scope: Scope,
        request: &PageRequest,
        columns: &[&'static str],
    ) -> Result<Vec<Record>> {
        self.check(entity)?;
        let needle = request.filter.to_lowercase();
        let mut rows: Vec<Record> = self
            .rows(entity)
            .into_iter()
            .filter(|r| in_scope(r, scope))
            .filter(|r| {
                needle.is_empty()
                    || entity
                        .searchable
                        .iter()
                        .any(|c| r.value(c).to_lowercase().contains(&needle))
            })
            .collect();

        rows.sort_by(|a, b| {
            let primary = match request.direction {
                SortDirection::Asc => compare(a, b, request.sort_by),
                SortDirection::Desc => compare(b, a, request.sort_by),
            };
            primary.then(a.id.cmp(&b.id))
        });

        Ok(rows
            .iter()
            .skip(request.offset() as usize)
            .take(request.page_size as usize)
            .map(|r| keep_columns(r, columns))
            .collect())
    }

    async fn count(&self, entity: &'static EntityDescriptor, scope: Scope) -> Result<i64> {
        self.check(entity)?;
        Ok(self.rows(entity).iter().filter(|r| in_scope(r, scope)).count() as i64)
    }

    async fn fetch_one(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        scope: Scope,
    ) -> Result<Option<Record>> {
        self.check(entity)?;
        Ok(self
            .rows(entity)
            .into_iter()
            .find(|r| r.id == id && in_scope(r, scope)))
    }

    async fn fetch_many(
        &self,
        entity: &'static EntityDescriptor,
        ids: &[Uuid],
        columns: &[&'static str],
    ) -> Result<Vec<Record>> {
        self.check(entity)?;
        Ok(self
            .rows(entity)
            .iter()
            .filter(|r| ids.contains(&r.id))
            .map(|r| keep_columns(r, columns))
            .collect())
    }

    async fn fetch_by_field(
        &self,
        entity: &'static EntityDescriptor,
        field: &'static str,
        value: &str,
        columns: &[&'static str],
    ) -> Result<Vec<Record>> {
        self.check(entity)?;
        let mut rows: Vec<Record> = self
            .rows(entity)
            .into_iter()
            .filter(|r| r.deleted_at.is_none() && r.value(field) == value)
            .collect();
        rows.sort_by(|a, b| compare(a, b, entity.default_sort).then(a.id.cmp(&b.id)));
        Ok(rows.iter().map(|r| keep_columns(r, columns)).collect())
    }

    async fn exists(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<bool> {
        self.check(entity)?;
        Ok(self.rows(entity).iter().any(|r| r.id == id))
    }

    async fn insert(&self, entity: &'static EntityDescriptor, record: &Record) -> Result<()> {
        self.check(entity)?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(entity.table).or_default();

        let key = natural_key(entity, &record.values);
        if rows
            .iter()
            .any(|r| r.id == record.id || natural_key(entity, &r.values) == key)
        {
            return Err(AppError::Duplicate);
        }

        rows.push(record.clone());
        Ok(())
    }

    async fn update(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        values: &FieldValues,
        updated_at: i64,
    ) -> Result<u64> {
        self.check(entity)?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(entity.table).or_default();

        let key = natural_key(entity, values);
        if rows
            .iter()
            .any(|r| r.id != id && natural_key(entity, &r.values) == key)
        {
            return Err(AppError::Duplicate);
        }

        let mut touched = 0;
        for row in rows.iter_mut().filter(|r| r.id == id) {
            for field in entity.fields {
                let value = values.get(field.name).cloned().unwrap_or_default();
                row.values.insert(field.name, value);
            }
            row.updated_at = updated_at;
            touched += 1;
        }
        Ok(touched)
    }

    async fn soft_delete(
        &self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        deleted_at: i64,
    ) -> Result<u64> {
        self.check(entity)?;
        let mut tables = self.tables.lock().unwrap();
        let mut touched = 0;
        for row in tables
            .entry(entity.table)
            .or_default()
            .iter_mut()
            .filter(|r| r.id == id)
        {
            row.deleted_at = Some(deleted_at);
            touched += 1;
        }
        Ok(touched)
    }

    async fn restore(&self, entity: &'static EntityDescriptor, id: Uuid) -> Result<u64> {
        self.check(entity)?;
        let mut tables = self.tables.lock().unwrap();
        let mut touched = 0;
        for row in tables
            .entry(entity.table)
            .or_default()
            .iter_mut()
            .filter(|r| r.id == id)
        {
            row.deleted_at = None;
            touched += 1;
        }
        Ok(touched)
    }
}

/// Clock that advances one second per reading, starting at [`CLOCK_START`].
pub fn ticking_clock() -> impl Fn() -> i64 + Send + Sync + 'static {
    let next = AtomicI64::new(CLOCK_START);
    move || next.fetch_add(1_000, AtomicOrdering::SeqCst)
}

pub fn test_service(store: Arc<MemoryStore>) -> ReferenceService {
    ReferenceService::new(store).with_clock(ticking_clock())
}

/// Scratch storage rooted in a fresh temporary directory.
pub fn test_scratch() -> (Arc<ScratchStorage>, PathBuf) {
    let root = std::env::temp_dir().join(format!("data-referensi-{}", Uuid::new_v4()));
    let config = ScratchConfig {
        upload_dir: root.join("uploads"),
        export_dir: root.join("exports"),
        retention: Duration::from_secs(300),
        sweep_interval: Duration::from_secs(60),
    };
    (Arc::new(ScratchStorage::new(&config)), root)
}

/// Full API router over an in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub scratch_root: PathBuf,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(test_service(Arc::clone(&store)));
    let (scratch, scratch_root) = test_scratch();

    let server = TestServer::new(api_router(service, scratch)).unwrap();
    TestApp {
        server,
        store,
        scratch_root,
    }
}
