pub mod progress;
pub mod request;
pub mod response;

pub use progress::{LoadProgress, LoadStatus};
pub use request::LoadRequest;
pub use response::{LoadResponse, LoadStartStatus, LoadSummary};
