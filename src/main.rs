//! jekyll2zola - Convert Jekyll posts into Zola posts

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = jekyll2zola::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
