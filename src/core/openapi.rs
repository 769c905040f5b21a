use utoipa::{Modify, OpenApi};

use crate::core::config::SwaggerConfig;
use crate::features::all_entities;
use crate::features::reference::dtos::{
    EntityBodyDto, ImportFileDto, ImportSummaryDto, ProjectionDto, RecordDto,
};
use crate::features::reference::handlers;
use crate::shared::types::{ApiResponse, Message, Metadata, Paginated};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list,
        handlers::create,
        handlers::search,
        handlers::export,
        handlers::import,
        handlers::list_trash,
        handlers::restore,
        handlers::get,
        handlers::update,
        handlers::delete,
    ),
    components(
        schemas(
            // Shared
            Message,
            Metadata,
            // Reference
            EntityBodyDto,
            ImportFileDto,
            ApiResponse<Paginated<RecordDto>>,
            ApiResponse<RecordDto>,
            ApiResponse<Vec<ProjectionDto>>,
            ApiResponse<ImportSummaryDto>,
        )
    ),
    tags(
        (name = "reference", description = "Reference data: one route set per entity, see the entity list above"),
    ),
    info(
        title = "Data Referensi API",
        version = "0.1.0",
        description = "Reference data (master data) service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl SwaggerInfoModifier {
    pub fn from_config(config: &SwaggerConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

/// The served document: generated paths plus configured info.
pub fn document(config: &SwaggerConfig) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier::from_config(config).modify(&mut openapi);
    openapi
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();

        // The generic paths use {group}/{entity}; list the concrete ones.
        let entities: Vec<String> = all_entities()
            .iter()
            .map(|e| format!("- `{}`", e.base_path()))
            .collect();
        openapi.info.description = Some(format!(
            "{}\n\nEntities:\n{}",
            self.description,
            entities.join("\n")
        ));
    }
}
