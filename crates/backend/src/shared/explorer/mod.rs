//! Dynamic schema discovery and the query pipeline over loaded JSON datasets.

pub mod catalog;
pub mod flatten;
pub mod normalize;
pub mod query_engine;
pub mod role_mapping;
pub mod session;
pub mod value_access;
pub mod view_selection;

pub use catalog::FieldCatalog;
pub use query_engine::{QueryContext, QueryError, QueryInput};
pub use session::{ExplorerError, ExplorerSession, SessionStore};
