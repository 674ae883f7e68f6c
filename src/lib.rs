//! jekyll2zola - Convert Jekyll posts into Zola posts
//!
//! Rewrites `---`-fenced YAML front matter as `+++`-fenced TOML front
//! matter, mapping Jekyll fields onto Zola's (`subtitle` becomes
//! `description`, `tags` and `author` become taxonomies, everything else
//! lands in `[extra]`). Post content is copied unchanged.

pub mod domain;
pub mod storage;
pub mod convert;
pub mod cli;

pub use convert::{convert_document, find_posts, Converter, Outcome};
pub use domain::{FieldRules, FrontMatterError, JekyllFrontmatter, ZolaDocument, ZolaFrontmatter};
