//! Command implementations.

pub mod classify;
pub mod run;
pub mod scrape;

pub use self::classify::{classify_source, execute_classify};
pub use self::run::execute_run;
pub use self::scrape::{execute_scrape, scrape_to_file};
