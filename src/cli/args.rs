//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Read, query and format hierarchical nestconf documents
#[derive(Parser, Debug)]
#[command(name = "nestconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Settings file layered over the global settings
    #[arg(short, long, global = true, env = "NESTCONF_SETTINGS", value_hint = ValueHint::FilePath)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a query path
    Get {
        /// Document to read (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Query path, e.g. `Section:Two/Port`
        path: String,
        /// Interpret the value as this type
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
        /// Printed when the path is missing or the value does not parse
        #[arg(long)]
        default: Option<String>,
    },

    /// Print the nodes matching a query path as nestconf text
    Query {
        /// Document to read (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Query path
        path: String,
        /// Print every match instead of the first
        #[arg(short, long)]
        all: bool,
    },

    /// Validate a document
    Check {
        /// Document to read (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Rewrite a document in canonical form
    ///
    /// Comments are not part of the document tree and are dropped.
    Fmt {
        /// Document to read (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Replace the file instead of printing (removes comments)
        #[arg(short, long)]
        write: bool,
        /// Spaces per nesting level (overrides settings)
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Show the document as a tree
    Tree {
        /// Document to read (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a settings template
    Template,
    /// Show the global settings file location
    Path,
}

/// Value interpretation for `get`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Bool,
    Int,
    Float,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_get_with_type_when_parsing_args_then_fields_set() {
        let cli = Cli::try_parse_from([
            "nestconf", "-dd", "get", "app.conf", "Server/Port", "--type", "int", "--default", "80",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Get {
                path,
                value_type,
                default,
                ..
            }) => {
                assert_eq!(path, "Server/Port");
                assert_eq!(value_type, ValueType::Int);
                assert_eq!(default.as_deref(), Some("80"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
