//! Domain models for jekyll2zola
//!
//! Front matter on both sides of the conversion, without any I/O concerns.

mod jekyll;
mod value;
mod zola;

pub use jekyll::{FieldRules, FrontMatterError, JekyllFrontmatter};
pub use value::StringOrList;
pub use zola::{Taxonomies, ZolaDocument, ZolaFrontmatter};
