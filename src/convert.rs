//! Post conversion pipeline
//!
//! One post at a time: read, decode the YAML front matter, map the fields,
//! encode as TOML, write. Nothing is shared between posts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{FieldRules, FrontMatterError, JekyllFrontmatter, ZolaDocument};
use crate::storage::{write_document, RawDocument};

/// What happened to a single post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Converted and written to the contained path
    Written(PathBuf),

    /// No usable front matter; nothing was written
    Skipped,
}

/// Converts a split post into a Zola document
///
/// `path` is only used to pick up the post date from the file name.
/// Returns `Ok(None)` when the post has no usable front matter.
pub fn convert_document(
    path: &Path,
    raw: &RawDocument,
    rules: &FieldRules,
) -> Result<Option<ZolaDocument>, FrontMatterError> {
    let Some(mapping) = raw.decode_front_matter() else {
        return Ok(None);
    };

    let mut front = JekyllFrontmatter::from_mapping(mapping, rules)?;
    front.apply_path_date(path);

    Ok(Some(ZolaDocument::new(front.into_zola()?, raw.content())))
}

/// Converts posts into a fixed destination
pub struct Converter {
    rules: FieldRules,
    dest: PathBuf,
}

impl Converter {
    /// Creates a converter writing to `dest` (an existing directory or a file path)
    pub fn new(rules: FieldRules, dest: impl Into<PathBuf>) -> Self {
        Self {
            rules,
            dest: dest.into(),
        }
    }

    /// Returns the destination path
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Converts one post file
    pub fn convert_file(&self, input: &Path) -> Result<Outcome> {
        let raw = RawDocument::read(input)?;

        let doc = convert_document(input, &raw, &self.rules)
            .with_context(|| format!("Failed to convert {}", input.display()))?;

        match doc {
            Some(doc) => Ok(Outcome::Written(write_document(&doc, input, &self.dest)?)),
            None => Ok(Outcome::Skipped),
        }
    }
}

/// Finds every post under `dir` whose file name ends in `.{extension}`
///
/// Entries are visited in name order, files of a directory before its
/// subdirectories.
pub fn find_posts(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension);
    let mut posts = Vec::new();
    collect_posts(dir, &suffix, &mut posts)?;
    Ok(posts)
}

fn collect_posts(dir: &Path, suffix: &str, posts: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .context("Failed to read directory entry")?;
    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;

        if file_type.is_dir() {
            subdirs.push(path);
        } else if entry.file_name().to_string_lossy().ends_with(suffix) {
            posts.push(path);
        }
    }

    for subdir in subdirs {
        collect_posts(&subdir, suffix, posts)?;
    }

    Ok(())
}
