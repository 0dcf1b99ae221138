// Dataset — input relations, title normalization, and the joined flat relation.

pub mod csv_source;
pub mod loader;
pub mod models;
pub mod title;
pub mod traits;
