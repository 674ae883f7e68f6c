//! Markdown post files
//!
//! Jekyll posts are read as `---`-fenced YAML front matter followed by
//! content. Converted posts are written as `+++`-fenced TOML front matter,
//! a blank line, and the original content byte for byte.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value as Yaml};

use super::encode::encode_front_matter;
use crate::domain::ZolaDocument;

/// Fence around Jekyll front matter
pub const JEKYLL_DELIMITER: &str = "---";

/// Fence around Zola front matter
pub const ZOLA_DELIMITER: &str = "+++";

/// Where the reader is relative to the front matter fences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Unknown,
    FrontMatter,
    Content,
}

/// A post split into its front matter and content lines
///
/// Lines keep their terminators so the content can be written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    pub front_lines: Vec<String>,
    pub content_lines: Vec<String>,
}

impl RawDocument {
    /// Reads and splits a post file
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read post: {}", path.display()))?;

        Ok(Self::parse(&text))
    }

    /// Splits post text on the first two delimiter lines
    ///
    /// Text before the first delimiter is ignored. Without a closing
    /// delimiter the content stays empty.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        let mut section = Section::Unknown;

        for line in text.split_inclusive('\n') {
            let is_delimiter = line.trim() == JEKYLL_DELIMITER;
            match section {
                Section::Unknown if is_delimiter => section = Section::FrontMatter,
                Section::Unknown => {}
                Section::FrontMatter if is_delimiter => section = Section::Content,
                Section::FrontMatter => doc.front_lines.push(line.to_string()),
                Section::Content => doc.content_lines.push(line.to_string()),
            }
        }

        doc
    }

    /// Returns the raw front matter text
    pub fn front_matter(&self) -> String {
        self.front_lines.concat()
    }

    /// Returns the content exactly as it appeared after the front matter
    pub fn content(&self) -> String {
        self.content_lines.concat()
    }

    /// Decodes the front matter as a YAML mapping
    ///
    /// Returns `None` when there is no usable document: an empty block,
    /// invalid YAML, or YAML that is not a non-empty mapping.
    pub fn decode_front_matter(&self) -> Option<Mapping> {
        let text = self.front_matter();
        if text.trim().is_empty() {
            return None;
        }

        match serde_yaml::from_str::<Yaml>(&text) {
            Ok(Yaml::Mapping(mapping)) if !mapping.is_empty() => Some(mapping),
            _ => None,
        }
    }
}

impl ZolaDocument {
    /// Renders the complete Zola post
    pub fn render(&self) -> Result<String> {
        let toml = encode_front_matter(&self.front)?;

        let mut out = String::with_capacity(toml.len() + self.content.len() + 10);
        out.push_str(ZOLA_DELIMITER);
        out.push('\n');
        out.push_str(&toml);
        out.push_str(ZOLA_DELIMITER);
        out.push_str("\n\n");
        out.push_str(&self.content);

        Ok(out)
    }
}

/// Resolves where a converted post goes
///
/// An existing directory receives a file named like the input; anything
/// else is taken as the output file path itself.
pub fn destination_for(input: &Path, dest: &Path) -> Result<PathBuf> {
    if dest.is_dir() {
        let name = input
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Input has no file name: {}", input.display()))?;
        Ok(dest.join(name))
    } else {
        Ok(dest.to_path_buf())
    }
}

/// Writes a converted post atomically (temp file + rename)
///
/// The temp file is a hidden sibling created exclusively, so no other file is
/// ever clobbered, and it is removed again if the write or rename fails.
/// Overwrites any existing file. Parent directories are not created.
pub fn write_document(doc: &ZolaDocument, input: &Path, dest: &Path) -> Result<PathBuf> {
    let path = destination_for(input, dest)?;
    let content = doc.render()?;

    let temp_path = temp_path_for(&path);
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    let replaced = replace_with(file, &content, &temp_path, &path);
    if replaced.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    replaced?;

    Ok(path)
}

/// Hidden, per-process sibling of `path`, e.g. `.post.md.4242.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, process::id()))
}

fn replace_with(mut file: File, content: &str, temp_path: &Path, path: &Path) -> Result<()> {
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    drop(file);

    fs::rename(temp_path, path).with_context(|| format!("Failed to replace {}", path.display()))
}
