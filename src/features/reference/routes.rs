use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};

use crate::features::reference::descriptor::EntityDescriptor;
use crate::features::reference::handlers::{self, EntityState};
use crate::features::reference::services::ReferenceService;
use crate::modules::storage::ScratchStorage;

/// Mount the full route set of one entity under its base path.
pub fn entity_routes(
    service: Arc<ReferenceService>,
    scratch: Arc<ScratchStorage>,
    entity: &'static EntityDescriptor,
) -> Router {
    let base = entity.base_path();
    let state = EntityState {
        service,
        entity,
        scratch,
    };

    let mut router = Router::new()
        .route(&base, get(handlers::list).post(handlers::create))
        .route(&format!("{}/export", base), get(handlers::export))
        .route(&format!("{}/search", base), get(handlers::search))
        .route(&format!("{}/import", base), post(handlers::import))
        .route(&format!("{}/trashs", base), get(handlers::list_trash))
        .route(&format!("{}/trashs/{{id}}", base), put(handlers::restore))
        .route(
            &format!("{}/{{id}}", base),
            get(handlers::get)
                .put(handlers::update)
                .delete(handlers::delete),
        );

    // Drill-down by parent, e.g. /api/region/cities/by-province/{parent_id}
    for relation in entity.relations {
        router = router.route(
            &format!("{}/{}/{{parent_id}}", base, relation.route),
            get(
                move |State(state): State<EntityState>, Path(parent_id): Path<String>| async move {
                    handlers::by_parent(state, relation, parent_id).await
                },
            ),
        );
    }

    router.with_state(state)
}

/// Routes for a group of entities.
pub fn group_routes(
    service: Arc<ReferenceService>,
    scratch: Arc<ScratchStorage>,
    entities: &[&'static EntityDescriptor],
) -> Router {
    entities.iter().fold(Router::new(), |router, entity| {
        router.merge(entity_routes(
            Arc::clone(&service),
            Arc::clone(&scratch),
            *entity,
        ))
    })
}
