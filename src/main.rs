//! # codeedit
//!
//! A code editor with live syntax highlighting and a line-number gutter.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with an empty Go buffer
//! cargo run
//!
//! # Open a file (language detected from its extension)
//! cargo run -- path/to/main.go
//!
//! # Use a specific config file and force a language
//! cargo run -- --config ./codeedit.toml --language rust notes.txt
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use codeedit_core::{CodeEditor, Config, Document};
use codeedit_ui::{Flags, run};

/// codeedit - a syntax-highlighting code editor
#[derive(Parser, Debug)]
#[command(name = "codeedit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Highlighting language, overriding detection
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load().context("failed to load config"),
    }
}

fn open_document(args: &Args, config: &Config) -> anyhow::Result<Document> {
    let line_height = config.font.line_height;
    let mut document = match &args.file {
        Some(path) if path.exists() => {
            Document::open(path, &config.editor.language, line_height)
                .with_context(|| format!("failed to open {}", path.display()))?
        }
        Some(path) => {
            tracing::info!(path = %path.display(), "file does not exist, starting empty");
            let language = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(codeedit_syntax::detect_language)
                .filter(|language| *language != "text")
                .unwrap_or(config.editor.language.as_str());
            Document::new("", language, line_height)
        }
        None => Document::new("", config.editor.language.as_str(), line_height),
    };

    if let Some(language) = &args.language {
        document = document.with_language(language.as_str());
    }
    Ok(document)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    tracing::info!("Starting codeedit v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref())?;
    let document = open_document(&args, &config)?;
    let editor = CodeEditor::new(document, &config).context("failed to build the editor")?;

    run(Flags { editor, config }).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["codeedit"]);
        assert!(args.file.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from(["codeedit", "-vv", "--language", "rust", "main.go"]);
        assert_eq!(args.file, Some(PathBuf::from("main.go")));
        assert_eq!(args.language.as_deref(), Some("rust"));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/codeedit.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn test_language_override_keeps_text() {
        let mut file = tempfile::Builder::new().suffix(".go").tempfile().unwrap();
        write!(file, "fn main() {{}}").unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let args = Args::parse_from(["codeedit", "--language", "rust", path.as_str()]);
        let document = open_document(&args, &Config::default()).unwrap();
        assert_eq!(document.language(), "rust");
        assert_eq!(document.text(), "fn main() {}");
        assert_eq!(document.file_path(), Some(file.path()));
    }

    #[test]
    fn test_new_file_uses_detected_language() {
        let args = Args::parse_from(["codeedit", "/nonexistent/dir/app.py"]);
        let document = open_document(&args, &Config::default()).unwrap();
        assert_eq!(document.language(), "python");
        assert_eq!(document.block_count(), 1);
    }
}
