//! Generic reference-data engine.
//!
//! Every lookup table (countries, banks, study programs, ...) shares one
//! implementation of list, search, get, create, update, soft delete, restore,
//! trash listing, spreadsheet import and export. Entities plug in through a
//! static [`descriptor::EntityDescriptor`].
//!
//! ## Endpoints (per entity)
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/{group}/{entity}` | Paginated list of active rows |
//! | POST | `/api/{group}/{entity}` | Create a row |
//! | GET | `/api/{group}/{entity}/search` | Short projections of active rows |
//! | GET | `/api/{group}/{entity}/export` | Download all active rows as xlsx |
//! | POST | `/api/{group}/{entity}/import` | Upsert rows from an xlsx upload |
//! | GET | `/api/{group}/{entity}/trashs` | Paginated list of trashed rows |
//! | PUT | `/api/{group}/{entity}/trashs/{id}` | Restore a trashed row |
//! | GET | `/api/{group}/{entity}/{id}` | Get an active row |
//! | PUT | `/api/{group}/{entity}/{id}` | Update an active row |
//! | DELETE | `/api/{group}/{entity}/{id}` | Move a row to the trash |
//! | GET | `/api/{group}/{entity}/by-{parent}/{parent_id}` | Children of a parent |

pub mod descriptor;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ReferenceService;
