//! Application-level helpers: input reading and preparation, progress and run
//! statistics.

mod input;
mod logging;
pub mod statistics;
mod url;

pub use input::read_url_lines;
pub use logging::log_progress;
pub use statistics::print_error_statistics;
pub use url::{normalize_url, prepare_urls};
