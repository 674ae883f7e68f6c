//! # Storage Layer
//!
//! File formats read and written by jekyll2zola.
//!
//! ## Formats
//!
//! | Data | Format | Delimiter |
//! |------|--------|-----------|
//! | Jekyll post (input) | Markdown + YAML front matter | `---` |
//! | Zola post (output) | Markdown + TOML front matter | `+++` |
//! | Config | TOML | `jekyll2zola.toml` |
//!
//! ## Key Types
//!
//! - [`RawDocument`] - A post split into front matter and content lines
//! - [`encode_front_matter`] - Zola front matter as TOML
//! - [`write_document`] - Writes a converted post (temp file + rename)
//! - [`Config`] - Default paths, extension and field rules

mod config;
mod encode;
mod markdown;

pub use config::{Config, ConfigError, DEFAULT_INPATH, DEFAULT_OUTPATH, LOCAL_CONFIG_FILE};
pub use encode::encode_front_matter;
pub use markdown::{destination_for, write_document, RawDocument, JEKYLL_DELIMITER, ZOLA_DELIMITER};
