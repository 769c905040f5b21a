//! Education lookups: educational levels, study programs, the university's own
//! study programs, and educations combining a level with an optional program.

pub mod entities;
pub mod routes;
