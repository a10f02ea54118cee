use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "listkeeper",
    version,
    about = "Manage saved entity list configurations",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory holding the list configuration store.
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Owner recorded on saved list configurations.
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    /// Timestamp format string (chrono format).
    #[arg(long, global = true)]
    pub timestamp_format: Option<String>,

    /// Classify touch input as taps and long presses.
    #[arg(long, global = true)]
    pub touch_enabled: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operations on the stored list configurations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show every list configuration and mark the active one.
    List,
    /// Create a list configuration and make it active.
    Add,
    /// Make a list configuration active.
    Select {
        /// Configuration id.
        id: String,
    },
    /// Rename the active list configuration.
    Rename {
        /// New name.
        name: String,
    },
    /// Delete the active list configuration.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Replace and save the themes of the active list configuration.
    Themes {
        /// Theme names.
        names: Vec<String>,
    },
    /// Render an entity against its schemas and print the display model.
    Render {
        /// JSON file with the entity schemas.
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,
        /// JSON file with the entity.
        #[arg(long, value_name = "FILE")]
        entity: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_command() {
        let args = CliArgs::parse_from(["listkeeper"]);
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_parse_subcommands() {
        let args = CliArgs::parse_from(["listkeeper", "themes", "dark", "forest"]);
        assert_eq!(
            args.command,
            Some(Command::Themes {
                names: vec!["dark".to_string(), "forest".to_string()]
            })
        );

        let args = CliArgs::parse_from([
            "listkeeper",
            "render",
            "--schema",
            "s.json",
            "--entity",
            "e.json",
        ]);
        assert!(matches!(args.command, Some(Command::Render { .. })));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["listkeeper", "select", "abc", "--user-id", "me"]);
        assert_eq!(args.user_id.as_deref(), Some("me"));
        assert_eq!(
            args.command,
            Some(Command::Select {
                id: "abc".to_string()
            })
        );
    }
}
