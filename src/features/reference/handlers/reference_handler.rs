use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::reference::descriptor::{EntityDescriptor, RelationSpec};
use crate::features::reference::dtos::{
    EntityBodyDto, EntityPayload, ImportFileDto, ImportSummaryDto, ListQuery, ProjectionDto,
    RecordDto,
};
use crate::features::reference::models::{FieldValues, Projection, Record};
use crate::features::reference::services::ReferenceService;
use crate::features::reference::store::Scope;
use crate::modules::storage::ScratchStorage;
use crate::shared::constants::{
    IMPORT_FIELD, MSG_DELETE_OK, MSG_GET_OK, MSG_IMPORT_OK, MSG_INSERT_OK, MSG_RESTORE_OK,
    MSG_UPDATE_OK, XLSX_CONTENT_TYPE,
};
use crate::shared::types::{ApiResponse, Paginated};
use crate::shared::validation::field_messages;

/// Router state for one entity's routes.
#[derive(Clone)]
pub struct EntityState {
    pub service: Arc<ReferenceService>,
    pub entity: &'static EntityDescriptor,
    pub scratch: Arc<ScratchStorage>,
}

/// Ids that do not parse can never match a row.
fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(raw.to_string()))
}

fn payload_values(
    entity: &'static EntityDescriptor,
    body: &Map<String, Value>,
) -> Result<FieldValues> {
    let payload = EntityPayload::from_json(entity, body);
    payload
        .validate()
        .map_err(|e| AppError::Validation(field_messages(&e)))?;
    Ok(payload.into_values())
}

// ==================== Listing ====================

/// List active rows
///
/// Paginated, filtered and sorted. Parent references are embedded.
#[utoipa::path(
    get,
    path = "/api/{group}/{entity}",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Page of active rows", body = ApiResponse<Paginated<RecordDto>>),
        (status = 422, description = "Invalid query parameters")
    ),
    tag = "reference"
)]
pub async fn list(
    State(state): State<EntityState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Paginated<Record>>>> {
    let request = query.resolve(state.entity)?;
    let (rows, total) = state
        .service
        .list(state.entity, Scope::Active, &request)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(Paginated::new(rows, request.page, request.page_size, total)),
        MSG_GET_OK,
    )))
}

/// List trashed rows
#[utoipa::path(
    get,
    path = "/api/{group}/{entity}/trashs",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Page of trashed rows", body = ApiResponse<Paginated<RecordDto>>),
        (status = 422, description = "Invalid query parameters")
    ),
    tag = "reference"
)]
pub async fn list_trash(
    State(state): State<EntityState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Paginated<Record>>>> {
    let request = query.resolve(state.entity)?;
    let (rows, total) = state
        .service
        .list(state.entity, Scope::Trashed, &request)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(Paginated::new(rows, request.page, request.page_size, total)),
        MSG_GET_OK,
    )))
}

/// Search active rows
///
/// Same filter, sort and paging as the list endpoint, returning the short
/// projection only.
#[utoipa::path(
    get,
    path = "/api/{group}/{entity}/search",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Matching projections", body = ApiResponse<Vec<ProjectionDto>>),
        (status = 422, description = "Invalid query parameters")
    ),
    tag = "reference"
)]
pub async fn search(
    State(state): State<EntityState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Projection>>>> {
    let request = query.resolve(state.entity)?;
    let rows = state.service.search(state.entity, &request).await?;
    Ok(Json(ApiResponse::success(Some(rows), MSG_GET_OK)))
}

/// List active children of a parent row
pub async fn by_parent(
    state: EntityState,
    relation: &'static RelationSpec,
    parent_id: String,
) -> Result<Json<ApiResponse<Vec<Projection>>>> {
    let rows = state
        .service
        .by_parent(state.entity, relation, &parent_id)
        .await?;
    Ok(Json(ApiResponse::success(Some(rows), MSG_GET_OK)))
}

/// Get an active row by id
#[utoipa::path(
    get,
    path = "/api/{group}/{entity}/{id}",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ("id" = String, Path, description = "Row id (UUID)")
    ),
    responses(
        (status = 200, description = "Row with embedded parents", body = ApiResponse<RecordDto>),
        (status = 400, description = "Row not found or trashed")
    ),
    tag = "reference"
)]
pub async fn get(
    State(state): State<EntityState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Record>>> {
    let id = parse_id(&id)?;
    let record = state.service.get(state.entity, id).await?;
    Ok(Json(ApiResponse::success(Some(record), MSG_GET_OK)))
}

// ==================== Mutations ====================

/// Create a row
#[utoipa::path(
    post,
    path = "/api/{group}/{entity}",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries")
    ),
    request_body = EntityBodyDto,
    responses(
        (status = 201, description = "Created row", body = ApiResponse<RecordDto>),
        (status = 400, description = "Malformed body or natural key already exists"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "reference"
)]
pub async fn create(
    State(state): State<EntityState>,
    AppJson(body): AppJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<ApiResponse<Record>>)> {
    let values = payload_values(state.entity, &body)?;
    let record = state.service.create(state.entity, values).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(record), MSG_INSERT_OK)),
    ))
}

/// Update an active row
///
/// Every natural field is replaced; omitted fields become empty.
#[utoipa::path(
    put,
    path = "/api/{group}/{entity}/{id}",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ("id" = String, Path, description = "Row id (UUID)")
    ),
    request_body = EntityBodyDto,
    responses(
        (status = 200, description = "Updated row", body = ApiResponse<RecordDto>),
        (status = 400, description = "Row not found or natural key already exists"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "reference"
)]
pub async fn update(
    State(state): State<EntityState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Map<String, Value>>,
) -> Result<Json<ApiResponse<Record>>> {
    let id = parse_id(&id)?;
    let values = payload_values(state.entity, &body)?;
    let record = state.service.update(state.entity, id, values).await?;
    Ok(Json(ApiResponse::success(Some(record), MSG_UPDATE_OK)))
}

/// Move a row to the trash
#[utoipa::path(
    delete,
    path = "/api/{group}/{entity}/{id}",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ("id" = String, Path, description = "Row id (UUID)")
    ),
    responses(
        (status = 200, description = "Row trashed"),
        (status = 400, description = "Row not found")
    ),
    tag = "reference"
)]
pub async fn delete(
    State(state): State<EntityState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    state.service.delete(state.entity, id).await?;
    Ok(Json(ApiResponse::success(None, MSG_DELETE_OK)))
}

/// Restore a trashed row
#[utoipa::path(
    put,
    path = "/api/{group}/{entity}/trashs/{id}",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries"),
        ("id" = String, Path, description = "Row id (UUID)")
    ),
    responses(
        (status = 200, description = "Row restored"),
        (status = 400, description = "Row not found")
    ),
    tag = "reference"
)]
pub async fn restore(
    State(state): State<EntityState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    state.service.restore(state.entity, id).await?;
    Ok(Json(ApiResponse::success(None, MSG_RESTORE_OK)))
}

// ==================== Spreadsheets ====================

/// Import rows from a workbook
///
/// The first row is a header. The first column is the id: an existing id
/// updates that row, an unknown id inserts under it and an empty cell inserts
/// under a fresh id. Processing stops at the first failing row.
#[utoipa::path(
    post,
    path = "/api/{group}/{entity}/import",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries")
    ),
    request_body(
        content = ImportFileDto,
        content_type = "multipart/form-data",
        description = "Workbook in the `file_import` field",
    ),
    responses(
        (status = 200, description = "All rows imported", body = ApiResponse<ImportSummaryDto>),
        (status = 400, description = "Missing file or natural key collision"),
        (status = 422, description = "A row failed validation")
    ),
    tag = "reference"
)]
pub async fn import(
    State(state): State<EntityState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportSummaryDto>>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some(IMPORT_FIELD) {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.xlsx").to_string();
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;
        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) = upload
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", IMPORT_FIELD)))?;

    let path = state.scratch.save_upload(&file_name, &data).await?;
    let outcome = state.service.import_file(state.entity, path.clone()).await;
    state.scratch.discard(&path).await;

    Ok(Json(ApiResponse::success(Some(outcome?), MSG_IMPORT_OK)))
}

/// Export every active row as a workbook
#[utoipa::path(
    get,
    path = "/api/{group}/{entity}/export",
    params(
        ("group" = String, Path, description = "region, biodata or education"),
        ("entity" = String, Path, description = "Entity segment, e.g. countries")
    ),
    responses(
        (status = 200, description = "xlsx workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 500, description = "Export failed")
    ),
    tag = "reference"
)]
pub async fn export(State(state): State<EntityState>) -> Result<impl IntoResponse> {
    let bytes = state.service.export(state.entity).await?;
    let file_name = state.entity.export_file_name();

    if let Err(e) = state.scratch.save_export(&file_name, &bytes).await {
        tracing::warn!("Export copy of {} not kept: {}", file_name, e);
    }

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", file_name),
            ),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use fake::faker::address::en::CountryName;
    use fake::Fake;
    use serde_json::{json, Value};

    use crate::features::biodata::entities::BANK;
    use crate::features::region::entities::{COUNTRY, PROVINCE};
    use crate::modules::spreadsheet;
    use crate::shared::constants::{MSG_DUPLICATE, MSG_ROUTE_NOT_FOUND, XLSX_CONTENT_TYPE};
    use crate::shared::test_helpers::{test_app, CLOCK_START};

    fn workbook(rows: &[[&str; 3]]) -> Vec<u8> {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        spreadsheet::write_table(&BANK.export_headers(), &rows).unwrap()
    }

    fn upload(bytes: Vec<u8>) -> MultipartForm {
        MultipartForm::new().add_part(
            "file_import",
            Part::bytes(bytes)
                .file_name("banks.xlsx")
                .mime_type(XLSX_CONTENT_TYPE),
        )
    }

    #[tokio::test]
    async fn test_create_then_get_country() {
        let app = test_app();
        let name: String = CountryName().fake();

        let created = app
            .server
            .post("/api/region/countries")
            .json(&json!({ "name": name, "phone_code": "62" }))
            .await;
        assert_eq!(created.status_code(), StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["error"], false);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let fetched = app.server.get(&format!("/api/region/countries/{}", id)).await;
        assert_eq!(fetched.status_code(), StatusCode::OK);
        let data = fetched.json::<Value>()["data"].clone();
        assert_eq!(data["name"], name.as_str());
        assert_eq!(data["phone_code"], "62");
        assert_eq!(data["created_at"], data["updated_at"]);
        assert!(data.get("deleted_at").is_none());
    }

    #[tokio::test]
    async fn test_create_same_country_twice() {
        let app = test_app();
        let body = json!({ "name": "Indonesia", "phone_code": "62" });

        let first = app.server.post("/api/region/countries").json(&body).await;
        assert_eq!(first.status_code(), StatusCode::CREATED);

        let second = app.server.post("/api/region/countries").json(&body).await;
        assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = second.json();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], MSG_DUPLICATE);
        assert_eq!(app.store.rows(&COUNTRY).len(), 1);
    }

    #[tokio::test]
    async fn test_create_reports_field_errors() {
        let app = test_app();
        let response = app
            .server
            .post("/api/biodata/religions")
            .json(&json!({ "code": "123" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["message"]["name"], "name is required.");
        assert_eq!(
            body["message"]["code"],
            "code exceeds the maximum digit limit."
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = test_app();
        let response = app
            .server
            .post("/api/biodata/banks")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_moves_row_to_trash() {
        let app = test_app();
        let bank = app.store.seed(&BANK, &[("code", "008"), ("name", "Mandiri")]);

        let deleted = app
            .server
            .delete(&format!("/api/biodata/banks/{}", bank.id))
            .await;
        assert_eq!(deleted.status_code(), StatusCode::OK);

        let trash: Value = app.server.get("/api/biodata/banks/trashs").await.json();
        assert_eq!(trash["data"]["metadata"]["total"], 1);
        assert_eq!(trash["data"]["data"][0]["id"], bank.id.to_string());
        assert!(trash["data"]["data"][0]["deleted_at"].as_i64().unwrap() > CLOCK_START);

        let active: Value = app.server.get("/api/biodata/banks").await.json();
        assert_eq!(active["data"]["metadata"]["total"], 0);
        assert_eq!(active["data"]["data"], json!([]));

        let missing = app
            .server
            .get(&format!("/api/biodata/banks/{}", bank.id))
            .await;
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let restored = app
            .server
            .put(&format!("/api/biodata/banks/trashs/{}", bank.id))
            .await;
        assert_eq!(restored.status_code(), StatusCode::OK);
        let active: Value = app.server.get("/api/biodata/banks").await.json();
        assert_eq!(active["data"]["metadata"]["total"], 1);
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_id_is_not_found() {
        let app = test_app();
        let malformed = app.server.delete("/api/biodata/banks/not-a-uuid").await;
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = malformed.json();
        assert_eq!(body["message"], "data with id not-a-uuid not found");

        let unknown = app
            .server
            .put(&format!("/api/biodata/banks/trashs/{}", uuid::Uuid::new_v4()))
            .await;
        assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_paging_metadata() {
        let app = test_app();
        for i in 0..7 {
            app.store.seed(
                &BANK,
                &[("code", &format!("{:03}", i)), ("name", &format!("Bank {}", i))],
            );
        }

        let body: Value = app
            .server
            .get("/api/biodata/banks")
            .add_query_param("page", "2")
            .add_query_param("page_size", "5")
            .add_query_param("sort_by", "code")
            .add_query_param("sort_direction", "desc")
            .await
            .json();

        assert_eq!(
            body["data"]["metadata"],
            json!({ "page": 2, "per_page": 5, "sub_total": 2, "total": 7 })
        );
        assert_eq!(body["data"]["data"][0]["code"], "001");
    }

    #[tokio::test]
    async fn test_list_rejects_bad_query() {
        let app = test_app();
        let response = app
            .server
            .get("/api/region/countries")
            .add_query_param("page", "abc")
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["message"]["page"], "page must be a number.");
    }

    #[tokio::test]
    async fn test_list_rejects_unreachable_page() {
        let app = test_app();
        app.store.seed(&BANK, &[("code", "002"), ("name", "BRI")]);

        let response = app
            .server
            .get("/api/biodata/banks")
            .add_query_param("page", i64::MAX)
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["message"]["page"], "page is invalid.");
    }

    #[tokio::test]
    async fn test_search_and_drill_down() {
        let app = test_app();
        let country = app
            .store
            .seed(&COUNTRY, &[("name", "Indonesia"), ("phone_code", "62")]);
        let country_id = country.id.to_string();
        app.store.seed(
            &PROVINCE,
            &[("country_id", &country_id), ("name", "Jawa Barat"), ("code", "32")],
        );
        app.store.seed(
            &PROVINCE,
            &[("country_id", &country_id), ("name", "Bali"), ("code", "51")],
        );

        let search: Value = app
            .server
            .get("/api/region/provinces/search")
            .add_query_param("filter", "jawa")
            .await
            .json();
        let found = search["data"].as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["code"], "32");
        assert!(found[0].get("country_id").is_none());

        let children: Value = app
            .server
            .get(&format!("/api/region/provinces/by-country/{}", country_id))
            .await
            .json();
        let names: Vec<_> = children["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Bali", "Jawa Barat"]);

        let listed: Value = app.server.get("/api/region/provinces").await.json();
        assert_eq!(listed["data"]["data"][0]["country"]["name"], "Indonesia");
    }

    #[tokio::test]
    async fn test_import_keeps_rows_before_failure() {
        let app = test_app();
        let bytes = workbook(&[
            ["", "002", "BRI"],
            ["", "00000000009", "Too long"],
            ["", "014", "BCA"],
        ]);

        let response = app
            .server
            .post("/api/biodata/banks/import")
            .multipart(upload(bytes))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(
            body["message"]["code"],
            "Row 3: code exceeds the maximum digit limit."
        );

        let rows = app.store.rows(&BANK);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("code"), "002");
    }

    #[tokio::test]
    async fn test_import_reports_summary() {
        let app = test_app();
        let existing = app.store.seed(&BANK, &[("code", "002"), ("name", "BRI")]);
        let existing_id = existing.id.to_string();
        let bytes = workbook(&[
            [existing_id.as_str(), "002", "Bank Rakyat Indonesia"],
            ["", "008", "Mandiri"],
        ]);

        let response = app
            .server
            .post("/api/biodata/banks/import")
            .multipart(upload(bytes))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"], json!({ "inserted": 1, "updated": 1 }));
        assert_eq!(app.store.rows(&BANK).len(), 2);

        let uploads = std::fs::read_dir(app.scratch_root.join("uploads")).unwrap();
        assert_eq!(uploads.count(), 0);
    }

    #[tokio::test]
    async fn test_import_without_file_is_bad_request() {
        let app = test_app();
        let form = MultipartForm::new().add_text("other", "value");
        let response = app
            .server
            .post("/api/biodata/banks/import")
            .multipart(form)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_corrupt_workbook_is_server_error() {
        let app = test_app();
        let response = app
            .server
            .post("/api/biodata/banks/import")
            .multipart(upload(b"definitely not a workbook".to_vec()))
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(app.store.rows(&BANK).is_empty());
    }

    #[tokio::test]
    async fn test_export_download() {
        let app = test_app();
        app.store.seed(&BANK, &[("code", "002"), ("name", "BRI")]);
        app.store.seed(&BANK, &[("code", "014"), ("name", "BCA")]);

        let response = app
            .server
            .get("/api/biodata/banks/export")
            .add_query_param("filter", "BRI")
            .add_query_param("page_size", "1")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            XLSX_CONTENT_TYPE
        );
        assert_eq!(
            response.header("content-disposition").to_str().unwrap(),
            "attachment; filename=Banks.xlsx"
        );

        let path = app.scratch_root.join("download.xlsx");
        std::fs::write(&path, response.as_bytes()).unwrap();
        let rows = spreadsheet::read_rows(&path).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.cells[2].as_str()).collect();
        assert_eq!(names, vec!["BCA", "BRI"]);
    }

    #[tokio::test]
    async fn test_unknown_route_and_health() {
        let app = test_app();

        let missing = app.server.get("/api/region/planets").await;
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        let body: Value = missing.json();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], MSG_ROUTE_NOT_FOUND);

        app.server.get("/health").await.assert_status_ok();
    }
}
