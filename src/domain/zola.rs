//! Zola front matter model
//!
//! Zola keeps a fixed set of top-level keys and pushes classification into
//! `[taxonomies]` and everything site-specific into `[extra]`.

use chrono::NaiveDate;
use serde::Serialize;

use super::jekyll::{FrontMatterError, JekyllFrontmatter};
use super::value::{scalar_to_string, yaml_to_toml, StringOrList};

/// Taxonomy terms of a post; absent axes are omitted from the output
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Taxonomies {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<String>>,
}

impl Taxonomies {
    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.author.is_none()
    }
}

/// Front matter of a Zola page
#[derive(Debug, Clone, PartialEq)]
pub struct ZolaFrontmatter {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,

    /// Kept in its original shape; only `taxonomies.author` is normalized
    pub author: Option<StringOrList>,
    pub taxonomies: Taxonomies,
    pub extra: toml::Table,
}

impl TryFrom<JekyllFrontmatter> for ZolaFrontmatter {
    type Error = FrontMatterError;

    fn try_from(front: JekyllFrontmatter) -> Result<Self, Self::Error> {
        let date = front
            .date
            .as_deref()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| FrontMatterError::InvalidDate(d.to_string()))
            })
            .transpose()?;

        let taxonomies = Taxonomies {
            tags: non_empty_list(front.tags.as_ref()),
            author: non_empty_list(front.author.as_ref()),
        };

        let mut extra = toml::Table::new();
        for (key, value) in &front.extra {
            let Some(key) = scalar_to_string(key) else {
                continue;
            };
            if let Some(value) = yaml_to_toml(value) {
                extra.insert(key, value);
            }
        }

        Ok(Self {
            title: front.title,
            date,
            description: front.subtitle,
            author: front.author,
            taxonomies,
            extra,
        })
    }
}

impl JekyllFrontmatter {
    /// Converts to Zola front matter, validating the date
    pub fn into_zola(self) -> Result<ZolaFrontmatter, FrontMatterError> {
        ZolaFrontmatter::try_from(self)
    }
}

fn non_empty_list(value: Option<&StringOrList>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty()).map(StringOrList::to_list)
}

/// A converted post: Zola front matter plus the untouched content
#[derive(Debug, Clone, PartialEq)]
pub struct ZolaDocument {
    pub front: ZolaFrontmatter,
    pub content: String,
}

impl ZolaDocument {
    pub fn new(front: ZolaFrontmatter, content: impl Into<String>) -> Self {
        Self {
            front,
            content: content.into(),
        }
    }
}
