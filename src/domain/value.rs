//! Value helpers shared by the Jekyll and Zola front matter models
//!
//! Jekyll front matter is loosely typed: `author` may be a string or a list,
//! `tags` may be a list or a bare word, and titles are sometimes numbers.
//! These helpers coerce YAML values into the shapes the converter needs and
//! translate arbitrary YAML into TOML for the `[extra]` table.

use serde::{Deserialize, Serialize};
use serde_yaml::Value as Yaml;

/// A field that Jekyll allows as either a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// Returns the values as a list, wrapping a single string
    pub fn to_list(&self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s.clone()],
            StringOrList::Many(items) => items.clone(),
        }
    }

    /// Returns true if there is nothing to classify
    pub fn is_empty(&self) -> bool {
        match self {
            StringOrList::One(s) => s.is_empty(),
            StringOrList::Many(items) => items.is_empty(),
        }
    }
}

/// Renders a YAML scalar as text, or `None` for null and collections
pub fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Tagged(tagged) => scalar_to_string(&tagged.value),
        Yaml::Null | Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}

/// Reads a string-or-list field; `None` means the YAML shape is not usable
pub fn string_or_list(value: &Yaml) -> Option<StringOrList> {
    match value {
        Yaml::Sequence(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .map(StringOrList::Many),
        Yaml::Tagged(tagged) => string_or_list(&tagged.value),
        other => scalar_to_string(other).map(StringOrList::One),
    }
}

/// Converts a YAML value into TOML
///
/// TOML has no null, so nulls (including null list items and map values)
/// are dropped and `None` is returned for a bare null.
pub fn yaml_to_toml(value: &Yaml) -> Option<toml::Value> {
    match value {
        Yaml::Null => None,
        Yaml::Bool(b) => Some(toml::Value::Boolean(*b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(toml::Value::Integer(i))
            } else {
                n.as_f64().map(toml::Value::Float)
            }
        }
        Yaml::String(s) => Some(toml::Value::String(s.clone())),
        Yaml::Sequence(items) => Some(toml::Value::Array(
            items.iter().filter_map(yaml_to_toml).collect(),
        )),
        Yaml::Mapping(map) => {
            let mut table = toml::Table::new();
            for (key, value) in map {
                let (Some(key), Some(value)) = (scalar_to_string(key), yaml_to_toml(value)) else {
                    continue;
                };
                table.insert(key, value);
            }
            Some(toml::Value::Table(table))
        }
        Yaml::Tagged(tagged) => yaml_to_toml(&tagged.value),
    }
}
