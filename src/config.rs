//! Application settings: schema types and the layered loader.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;
