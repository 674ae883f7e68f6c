//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use super::output::{Output, OutputFormat};
use crate::convert::{find_posts, Converter, Outcome};
use crate::storage::Config;

#[derive(Parser, Debug)]
#[command(name = "jekyll2zola")]
#[command(author, version, about = "Convert Jekyll posts into Zola posts")]
pub struct Cli {
    /// Input post file, or directory searched recursively for posts
    #[arg(long, short = 'i', env = "JEKYLL2ZOLA_INPATH")]
    pub inpath: Option<PathBuf>,

    /// Output file, or existing directory receiving posts by file name
    #[arg(long, short = 'o', env = "JEKYLL2ZOLA_OUTPATH")]
    pub outpath: Option<PathBuf>,

    /// Configuration file (defaults to ./jekyll2zola.toml, then the user config)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Report posts that fail to convert and carry on with the rest
    #[arg(long)]
    pub keep_going: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Written,
    Skipped,
    Failed,
}

/// Result of converting a single post
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub status: FileStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-post results of a run
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub files: Vec<FileReport>,
}

impl Summary {
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// One-line text summary
    pub fn message(&self) -> String {
        let mut message = format!(
            "Converted {} post(s), skipped {}",
            self.count(FileStatus::Written),
            self.count(FileStatus::Skipped)
        );
        let failed = self.count(FileStatus::Failed);
        if failed > 0 {
            message.push_str(&format!(", failed {}", failed));
        }
        message
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "converted": self.count(FileStatus::Written),
            "skipped": self.count(FileStatus::Skipped),
            "failed": self.count(FileStatus::Failed),
            "files": self.files,
        })
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("jekyll2zola starting");

    let config = Config::load(cli.config.as_deref())?;
    match &config.source {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "No config file, using defaults"),
    }

    let inpath = config.resolve_inpath(cli.inpath);
    let outpath = config.resolve_outpath(cli.outpath);
    let keep_going = cli.keep_going || config.keep_going;

    let posts = if inpath.is_file() {
        vec![inpath.clone()]
    } else if inpath.is_dir() {
        find_posts(&inpath, &config.extension)?
    } else {
        output.error(&format!("No input file provided: {}", inpath.display()));
        return Ok(());
    };
    output.verbose_ctx(
        "walk",
        &format!("Found {} post(s) in {}", posts.len(), inpath.display()),
    );

    let converter = Converter::new(config.fields, outpath);
    if posts.len() > 1 && !converter.dest().is_dir() {
        output.verbose_ctx(
            "walk",
            &format!(
                "{} is not a directory, each post overwrites it",
                converter.dest().display()
            ),
        );
    }

    let summary = convert_all(&converter, &posts, keep_going, &output)?;

    if output.is_json() {
        output.data(&summary.to_json());
    } else {
        output.success(&summary.message());
    }

    let failed = summary.count(FileStatus::Failed);
    if failed > 0 {
        anyhow::bail!("{} post(s) failed to convert", failed);
    }

    output.verbose("Conversion completed successfully");
    Ok(())
}

/// Converts every post in order
///
/// Posts without usable front matter are skipped with a diagnostic. Any
/// other failure aborts the run unless `keep_going` is set, in which case
/// it is reported and recorded.
pub fn convert_all(
    converter: &Converter,
    posts: &[PathBuf],
    keep_going: bool,
    output: &Output,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for post in posts {
        let report = match converter.convert_file(post) {
            Ok(Outcome::Written(dest)) => {
                output.verbose_ctx(
                    "convert",
                    &format!("{} -> {}", post.display(), dest.display()),
                );
                file_report(post, FileStatus::Written, Some(dest), None)
            }
            Ok(Outcome::Skipped) => {
                output.error(&format!(
                    "Could not parse the front matter of {}",
                    post.display()
                ));
                file_report(post, FileStatus::Skipped, None, None)
            }
            Err(e) if keep_going => {
                output.error(&format!("{:#}", e));
                file_report(post, FileStatus::Failed, None, Some(format!("{:#}", e)))
            }
            Err(e) => return Err(e),
        };
        summary.files.push(report);
    }

    Ok(summary)
}

fn file_report(
    input: &Path,
    status: FileStatus,
    output: Option<PathBuf>,
    error: Option<String>,
) -> FileReport {
    FileReport {
        input: input.to_path_buf(),
        status,
        output,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldRules;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["jekyll2zola", "-i", "posts", "-o", "out", "-v"]).unwrap();
        assert_eq!(cli.inpath, Some(PathBuf::from("posts")));
        assert_eq!(cli.outpath, Some(PathBuf::from("out")));
        assert!(cli.verbose);
        assert!(!cli.keep_going);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    fn setup() -> (TempDir, Vec<PathBuf>) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        let posts = vec![
            dir.path().join("2021-01-01-a.md"),
            dir.path().join("2021-01-02-untitled.md"),
            dir.path().join("2021-01-03-c.md"),
        ];
        fs::write(&posts[0], "---\ntitle: A\n---\nA\n").unwrap();
        fs::write(&posts[1], "---\nlayout: post\n---\nB\n").unwrap();
        fs::write(&posts[2], "---\ntitle: C\n---\nC\n").unwrap();
        (dir, posts)
    }

    #[test]
    fn fatal_error_aborts_batch() {
        let (dir, posts) = setup();
        let converter = Converter::new(FieldRules::default(), dir.path().join("out"));
        let output = Output::new(OutputFormat::Text, false);

        assert!(convert_all(&converter, &posts, false, &output).is_err());
        assert!(dir.path().join("out/2021-01-01-a.md").exists());
        assert!(!dir.path().join("out/2021-01-03-c.md").exists());
    }

    #[test]
    fn keep_going_records_failures() {
        let (dir, posts) = setup();
        let converter = Converter::new(FieldRules::default(), dir.path().join("out"));
        let output = Output::new(OutputFormat::Text, false);

        let summary = convert_all(&converter, &posts, true, &output).unwrap();

        assert_eq!(summary.count(FileStatus::Written), 2);
        assert_eq!(summary.count(FileStatus::Failed), 1);
        assert!(dir.path().join("out/2021-01-03-c.md").exists());
        assert_eq!(
            summary.message(),
            "Converted 2 post(s), skipped 0, failed 1"
        );

        let json = summary.to_json();
        assert_eq!(json["failed"], 1);
        assert_eq!(json["files"][1]["status"], "failed");
        assert!(json["files"][1]["error"]
            .as_str()
            .unwrap()
            .contains("title"));
    }
}
