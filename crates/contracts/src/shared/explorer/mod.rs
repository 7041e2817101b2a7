pub mod catalog;
pub mod mapping;
pub mod payload;
pub mod query;
pub mod role;
pub mod view;

pub use catalog::*;
pub use mapping::*;
pub use payload::*;
pub use query::*;
pub use role::*;
pub use view::*;
