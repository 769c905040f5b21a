use std::sync::Arc;

use axum::Router;

use crate::features::education::entities;
use crate::features::reference::routes::group_routes;
use crate::features::reference::ReferenceService;
use crate::modules::storage::ScratchStorage;

/// Create routes for every education entity
pub fn routes(service: Arc<ReferenceService>, scratch: Arc<ScratchStorage>) -> Router {
    group_routes(service, scratch, &entities::ALL)
}
