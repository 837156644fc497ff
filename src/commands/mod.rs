//! CLI command implementations.
//!
//! - **analyze**: analyse files or standard input and report the results
//! - **init**: write a default `.algoscope.toml`
//! - **languages**: list the supported languages

pub mod analyze;
pub mod init;
pub mod languages;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use languages::list_languages;
