pub mod config;
pub mod logging;

pub mod error;
pub mod fetcher;
pub mod storage;
pub mod url_model;

pub use config::FetchConfig;
pub use error::{ErrorCategory, FetchError};
pub use fetcher::{fetch_and_save, Fetcher, Outcome, SavedFile};
