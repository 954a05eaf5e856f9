//! CLI argument definitions using clap
//!
//! Commands:
//! - treefill generate --type-name <T> --out <dir> [--default name=value]... [--required name]...
//! - treefill merge --type-name <T> --overrides <name> [--config <path>]
//! - treefill check --type-name <T> --overrides <name>... [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::generator::ParameterSpec;

/// treefill - populate typed values from XML value trees
#[derive(Parser, Debug)]
#[command(name = "treefill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Also log per-field injection detail
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default-values document for a type
    Generate {
        /// Simple name of the destination type
        #[arg(long)]
        type_name: String,

        /// Directory the document is written to
        #[arg(long)]
        out: PathBuf,

        /// Default value, as name=value (repeatable)
        #[arg(long = "default")]
        defaults: Vec<ParameterSpec>,

        /// Name of a required field (repeatable)
        #[arg(long = "required")]
        required: Vec<String>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective value tree as JSON
    Merge {
        /// Simple name of the destination type
        #[arg(long)]
        type_name: String,

        /// Name of the override document
        #[arg(long)]
        overrides: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check override documents against the type's required values
    Check {
        /// Simple name of the destination type
        #[arg(long)]
        type_name: String,

        /// Names of the override documents
        #[arg(long, num_args = 1.., required = true)]
        overrides: Vec<String>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::parse_from([
            "treefill",
            "generate",
            "--type-name",
            "BuildMojo",
            "--out",
            "target/generated-resources",
            "--default",
            "retries=3",
            "--required",
            "token",
        ]);

        match cli.command {
            Command::Generate {
                type_name,
                defaults,
                required,
                ..
            } => {
                assert_eq!(type_name, "BuildMojo");
                assert_eq!(defaults, vec![ParameterSpec::new("retries").with_default("3")]);
                assert_eq!(required, vec!["token".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_default_rejected() {
        let result = Cli::try_parse_from([
            "treefill",
            "generate",
            "--type-name",
            "T",
            "--out",
            "o",
            "--default",
            "novalue",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_takes_several_overrides() {
        let cli = Cli::parse_from([
            "treefill",
            "--verbose",
            "check",
            "--type-name",
            "T",
            "--overrides",
            "a.xml",
            "b.xml",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Check { overrides, .. } => assert_eq!(overrides, vec!["a.xml", "b.xml"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
