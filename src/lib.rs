/*!
 * # subtidy - subtitle reformatting
 *
 * A Rust library for cleaning up subtitle text files.
 *
 * ## Features
 *
 * - Split a subtitle document into per-entry groups
 * - Parse two dialects:
 *   - bilingual subtitles (index, timestamp, up to two language lines)
 *   - raw captions (index, timestamp, any number of lines merged into one)
 * - Reformat spacing, translate speaker names, renumber entries
 * - Serialize back to canonical CRLF text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `formatter`: Splitting raw text into entry groups
 * - `subtitle_processor`: Entry model, parsing and serialization
 * - `name_dictionary`: Name token translation
 * - `app_config`: Configuration management
 * - `app_controller`: File level pipeline
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod formatter;
pub mod name_dictionary;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, SubtitleError};
pub use formatter::{split_into_groups, EOL};
pub use name_dictionary::NameDictionary;
pub use subtitle_processor::{serialize, Dialect, SubtitleCollection, SubtitleEntry};

/// Load a bilingual subtitle document
pub fn load_subtitles(text: &str) -> Result<SubtitleCollection, SubtitleError> {
    SubtitleCollection::from_subtitles(text)
}

/// Load a raw caption document
pub fn load_cc(text: &str) -> Result<SubtitleCollection, SubtitleError> {
    SubtitleCollection::from_cc(text)
}
