//! TOML encoding of Zola front matter

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{Taxonomies, ZolaFrontmatter};

/// Serialized layout of the front matter; field order is output order
#[derive(Serialize)]
struct TomlFront<'a> {
    title: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,

    #[serde(skip_serializing_if = "no_taxonomies")]
    taxonomies: &'a Taxonomies,

    #[serde(skip_serializing_if = "no_extra")]
    extra: &'a toml::Table,
}

fn no_taxonomies(taxonomies: &&Taxonomies) -> bool {
    taxonomies.is_empty()
}

fn no_extra(extra: &&toml::Table) -> bool {
    extra.is_empty()
}

/// Encodes front matter as TOML, ending with a single newline
///
/// The compact serializer writes every array inline, so a one-element
/// list stays `["solo"]`. Strings are never rewritten after serialization.
pub fn encode_front_matter(front: &ZolaFrontmatter) -> Result<String> {
    let view = TomlFront {
        title: &front.title,
        date: front.date.map(|d| d.format("%Y-%m-%d").to_string()),
        description: front.description.as_deref(),
        taxonomies: &front.taxonomies,
        extra: &front.extra,
    };

    let encoded = toml::to_string(&view).context("Failed to serialize front matter")?;

    Ok(format!("{}\n", encoded.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StringOrList;
    use chrono::NaiveDate;

    fn front() -> ZolaFrontmatter {
        ZolaFrontmatter {
            title: "Hello".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 5, 1),
            description: Some("A story".to_string()),
            author: Some(StringOrList::One("Alice".to_string())),
            taxonomies: Taxonomies {
                tags: Some(vec!["solo".to_string()]),
                author: Some(vec!["Alice".to_string()]),
            },
            extra: toml::Table::new(),
        }
    }

    #[test]
    fn encodes_fields_in_order() {
        let toml = encode_front_matter(&front()).unwrap();

        let title = toml.find("title = \"Hello\"").unwrap();
        let date = toml.find("date = \"2023-05-01\"").unwrap();
        let description = toml.find("description = \"A story\"").unwrap();
        let taxonomies = toml.find("[taxonomies]").unwrap();
        assert!(title < date && date < description && description < taxonomies);
        assert!(toml.ends_with('\n') && !toml.ends_with("\n\n"));
    }

    #[test]
    fn single_tag_stays_on_one_line() {
        let toml = encode_front_matter(&front()).unwrap();
        assert!(toml.contains("tags = [\"solo\"]"), "got:\n{}", toml);
        assert!(toml.contains("author = [\"Alice\"]"), "got:\n{}", toml);
    }

    #[test]
    fn top_level_author_is_not_emitted() {
        let mut front = front();
        front.taxonomies = Taxonomies::default();
        let toml = encode_front_matter(&front).unwrap();
        assert!(!toml.contains("author"));
        assert!(!toml.contains("[taxonomies]"));
    }

    #[test]
    fn absent_fields_are_omitted() {
        let front = ZolaFrontmatter {
            title: "Bare".to_string(),
            date: None,
            description: None,
            author: None,
            taxonomies: Taxonomies::default(),
            extra: toml::Table::new(),
        };
        assert_eq!(encode_front_matter(&front).unwrap(), "title = \"Bare\"\n");
    }

    #[test]
    fn extra_table_follows_taxonomies() {
        let mut front = front();
        front
            .extra
            .insert("cover".to_string(), toml::Value::String("a.jpg".into()));
        let toml = encode_front_matter(&front).unwrap();

        let taxonomies = toml.find("[taxonomies]").unwrap();
        let extra = toml.find("[extra]").unwrap();
        assert!(taxonomies < extra);
        assert!(toml.contains("cover = \"a.jpg\""));
    }

    #[test]
    fn multi_element_arrays_stay_inline() {
        let mut front = front();
        front.taxonomies.tags = Some(vec!["a".to_string(), "b".to_string()]);
        let toml = encode_front_matter(&front).unwrap();
        assert!(toml.contains("tags = [\"a\", \"b\"]"), "got:\n{}", toml);
    }

    #[test]
    fn bracketed_text_in_extra_strings_is_untouched() {
        let snippet = "let v = [\n    1,\n];\n";
        let mut front = front();
        front
            .extra
            .insert("snippet".to_string(), toml::Value::String(snippet.into()));
        front.extra.insert(
            "list".to_string(),
            toml::Value::String("[\n    1,\n]".into()),
        );

        let toml = encode_front_matter(&front).unwrap();
        let parsed: toml::Table = toml::from_str(&toml).unwrap();
        let extra = parsed["extra"].as_table().unwrap();

        assert_eq!(extra["snippet"].as_str(), Some(snippet));
        assert_eq!(extra["list"].as_str(), Some("[\n    1,\n]"));
    }
}
