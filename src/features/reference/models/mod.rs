mod record;

pub use record::{FieldValues, Projection, Record};
