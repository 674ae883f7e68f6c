//! # Command-Line Interface
//!
//! `jekyll2zola` takes an input post or directory of posts and an output
//! file or directory:
//!
//! ```bash
//! jekyll2zola -i site/_posts -o zola/content/blog
//! ```
//!
//! ## Flags
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `--inpath`, `-i` | Post file or directory (default `_posts`) |
//! | `--outpath`, `-o` | Output file or existing directory (default `content`) |
//! | `--config`, `-c` | Configuration file (default `./jekyll2zola.toml`) |
//! | `--keep-going` | Report failing posts and continue |
//! | `--format`, `-f` | `text` (default) or `json` |
//! | `--verbose`, `-v` | Debug output on stderr |
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and convert.

mod app;
mod output;

pub use app::{convert_all, run, Cli, FileReport, FileStatus, Summary};
pub use output::{Output, OutputFormat};
