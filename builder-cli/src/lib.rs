//! # Coconut Builder CLI
//!
//! Command-line tools for saved builder pages.
//!
//! ## Usage
//!
//! ```bash
//! builder export pages/home.json -o home.html --title "My Site"
//! builder inspect pages/home.json
//! builder --data-dir pages new landing --with text,image,button
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved settings (data directory, export title)
//! - [`commands`] - One function per subcommand, returning output instead of
//!   printing it

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the builder CLI.
#[derive(Debug, Clone, Parser)]
#[command(name = "builder")]
#[command(about = "Coconut website builder page tools")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding saved pages
    #[arg(long, global = true, env = "BUILDER_DATA_DIR", default_value = "pages")]
    pub data_dir: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Builder subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Export a page document as standalone HTML
    Export {
        /// Page document (JSON)
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document title, overriding the page's own
        #[arg(long, env = "BUILDER_EXPORT_TITLE")]
        title: Option<String>,
    },

    /// List a page's elements in stacking order
    Inspect {
        /// Page document (JSON)
        input: PathBuf,
    },

    /// Create a page in the data directory
    New {
        /// Page identifier
        page_id: String,

        /// Element types to place, comma separated
        #[arg(long = "with", value_delimiter = ',')]
        with: Vec<String>,

        /// Page title
        #[arg(long, default_value = "")]
        title: String,
    },
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding saved pages.
    pub data_dir: PathBuf,
    /// Command to run.
    pub command: Command,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let command = match args.command {
            Command::Export {
                input,
                output,
                title,
            } => Command::Export {
                input,
                output,
                title: title.filter(|t| !t.trim().is_empty()),
            },
            other => other,
        };
        Self {
            data_dir: args.data_dir,
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::from(CliArgs::try_parse_from(args).expect("valid args"))
    }

    #[test]
    fn test_parse_export() {
        let config = parse(&["builder", "export", "home.json", "-o", "out.html", "--title", "Hi"]);
        match config.command {
            Command::Export {
                input,
                output,
                title,
            } => {
                assert_eq!(input, PathBuf::from("home.json"));
                assert_eq!(output, Some(PathBuf::from("out.html")));
                assert_eq!(title.as_deref(), Some("Hi"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_blank_title_is_dropped() {
        let config = parse(&["builder", "export", "home.json", "--title", "  "]);
        assert!(matches!(config.command, Command::Export { title: None, .. }));
    }

    #[test]
    fn test_parse_new_with_types() {
        let config = parse(&[
            "builder",
            "--data-dir",
            "/tmp/pages",
            "new",
            "landing",
            "--with",
            "text,image",
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pages"));
        match config.command {
            Command::New { page_id, with, .. } => {
                assert_eq!(page_id, "landing");
                assert_eq!(with, vec!["text".to_string(), "image".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(CliArgs::try_parse_from(["builder"]).is_err());
    }
}
