pub mod config;
pub mod debounce;
pub mod explorer;
pub mod format;
pub mod state;
