pub mod executor;
pub mod loader;
pub mod progress_tracker;

pub use executor::LoadExecutor;
pub use loader::LoadError;
