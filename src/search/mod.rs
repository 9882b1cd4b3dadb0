mod config;
mod core;
mod errors;
mod store;

pub use config::SearchConfig;
pub use core::{ExpressionSearch, SearchOutcome, search_space_size};
pub use errors::SearchError;
pub use store::ResultStore;
