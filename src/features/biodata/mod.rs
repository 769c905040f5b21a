//! Personal data lookups: banks, religions, jobs, marriage statuses, ethnic
//! groups and almamater (jacket) sizes.

pub mod entities;
pub mod routes;
