mod column;
mod foreign_key;
mod primary_key;
mod relationship;
mod schema_graph;
mod semantic_type;
mod table;

pub use column::*;
pub use foreign_key::*;
pub use primary_key::*;
pub use relationship::*;
pub use schema_graph::*;
pub use semantic_type::*;
pub use table::*;
