//! Jekyll front matter model
//!
//! Jekyll posts carry YAML front matter with a handful of well-known fields
//! (`title`, `date`, `subtitle`, `author`, `tags`). Everything else is kept
//! as extra data, after the [`FieldRules`] have dropped template-only keys
//! and renamed legacy ones.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as Yaml};
use thiserror::Error;

use super::value::{scalar_to_string, string_or_list, StringOrList};

/// `YYYY-MM-DD` anywhere in a post path, e.g. `_posts/2023-05-01-hello.md`
static PATH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid date pattern"));

#[derive(Debug, Error, PartialEq)]
pub enum FrontMatterError {
    #[error("Front matter is missing the required 'title' field")]
    MissingTitle,

    #[error("Front matter field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Rules applied to the extra (unrecognized) front matter keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
    /// Keys removed outright (theme/template markers)
    pub drop: Vec<String>,

    /// Keys renamed from a legacy name to the one Zola themes expect
    pub rename: BTreeMap<String, String>,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            drop: vec!["layout".to_string()],
            rename: BTreeMap::from([("header-img".to_string(), "cover".to_string())]),
        }
    }
}

impl FieldRules {
    fn drops(&self, key: &str) -> bool {
        self.drop.iter().any(|k| k == key)
    }

    /// Returns true if `key` is the target of a rename whose source is present
    fn is_shadowed(&self, key: &str, mapping: &Mapping) -> bool {
        self.rename
            .iter()
            .any(|(from, to)| to == key && mapping.contains_key(from.as_str()))
    }
}

/// Front matter of a Jekyll post
#[derive(Debug, Clone, PartialEq)]
pub struct JekyllFrontmatter {
    pub title: String,
    pub date: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<StringOrList>,
    pub tags: Option<StringOrList>,

    /// Every other key, in source order
    pub extra: Mapping,
}

impl JekyllFrontmatter {
    /// Builds the front matter from a decoded YAML mapping
    pub fn from_mapping(mapping: Mapping, rules: &FieldRules) -> Result<Self, FrontMatterError> {
        let title = text_field(&mapping, "title")?.ok_or(FrontMatterError::MissingTitle)?;
        let date = text_field(&mapping, "date")?;
        let subtitle = text_field(&mapping, "subtitle")?;
        let author = list_field(&mapping, "author")?;
        let tags = list_field(&mapping, "tags")?;

        let mut extra = Mapping::new();
        let mut renamed = Vec::new();
        for (key, value) in &mapping {
            let Some(name) = key.as_str() else {
                extra.insert(key.clone(), value.clone());
                continue;
            };

            if matches!(name, "title" | "date" | "subtitle" | "author" | "tags")
                || rules.drops(name)
                || rules.is_shadowed(name, &mapping)
            {
                continue;
            }

            match rules.rename.get(name) {
                Some(target) => renamed.push((Yaml::String(target.clone()), value.clone())),
                None => {
                    extra.insert(key.clone(), value.clone());
                }
            }
        }
        // Renamed keys go after the others
        extra.extend(renamed);

        Ok(Self {
            title,
            date,
            subtitle,
            author,
            tags,
            extra,
        })
    }

    /// Overrides the date with the first `YYYY-MM-DD` found in `path`
    ///
    /// Jekyll derives the post date from its file name, so the path wins
    /// over whatever the front matter says. Returns true if a date was found.
    pub fn apply_path_date(&mut self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        match PATH_DATE.find(&path) {
            Some(m) => {
                self.date = Some(m.as_str().to_string());
                true
            }
            None => false,
        }
    }
}

fn text_field(mapping: &Mapping, field: &'static str) -> Result<Option<String>, FrontMatterError> {
    match mapping.get(field) {
        None | Some(Yaml::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or(FrontMatterError::InvalidField {
                field,
                expected: "a string",
            }),
    }
}

fn list_field(
    mapping: &Mapping,
    field: &'static str,
) -> Result<Option<StringOrList>, FrontMatterError> {
    match mapping.get(field) {
        None | Some(Yaml::Null) => Ok(None),
        Some(value) => string_or_list(value)
            .map(Some)
            .ok_or(FrontMatterError::InvalidField {
                field,
                expected: "a string or a list of strings",
            }),
    }
}
