#[cfg(test)]
mod test_helpers;

mod descriptors;
mod driver;
mod error;
mod generation;
mod models;
mod naming;
mod options;
mod parallel_runner;
mod postgres_client_wrapper;
mod relationships;
mod schema_builder;

pub use descriptors::*;
pub use driver::*;
pub use error::*;
pub use generation::*;
pub use models::*;
pub use naming::function_name;
pub use options::*;
pub use postgres_client_wrapper::PostgresClientWrapper;
pub use relationships::*;
pub use schema_builder::introspect;

pub(crate) fn default<T: Default>() -> T {
    T::default()
}
