pub mod categories;
pub mod collector;
pub mod config;
pub mod extract;
pub mod report;
pub mod session;
pub mod writer;

pub use categories::{Category, CategoryTable, ConfigError, ITUNES_BASE_URL};
pub use collector::{next_step, CategoryCollector, Flow};
pub use config::{CollectorConfig, OnError};
pub use report::{CategoryOutcome, ScrapeReport};
pub use session::{FetchError, HttpSession};
