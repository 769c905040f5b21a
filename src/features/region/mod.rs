//! Administrative regions: countries, provinces, cities, districts and villages.
//!
//! Each level references its parent by id and can be listed per parent, e.g.
//! `/api/region/cities/by-province/{province_id}`.

pub mod entities;
pub mod routes;
