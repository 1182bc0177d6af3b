//! Command-line surface.

mod commands;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{run, SignInRequired};
pub use terminal::{TerminalNavigator, TerminalNotifier};

#[derive(Debug, Parser)]
#[command(name = "turfdesk", version, about = "Turf booking and player roster client")]
pub struct Cli {
    /// Config file (default: <config dir>/turfdesk/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List players, optionally filtered
    Players {
        /// Match against name, position and nationality
        #[arg(long, short)]
        query: Option<String>,

        #[command(subcommand)]
        action: Option<PlayerAction>,
    },
    /// List turfs, optionally filtered
    Turfs {
        /// Match against name and location
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one turf
    Turf {
        #[arg(value_parser = parse_id)]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayerAction {
    /// Show one player with average stats
    Show {
        #[arg(value_parser = parse_id)]
        id: String,
    },
    /// Create a player from field assignments
    Add {
        /// Field assignment, repeatable: --set name=Alice
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    /// Update a player; unset fields keep their current value
    Edit {
        #[arg(value_parser = parse_id)]
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    /// Delete a player
    Delete {
        #[arg(value_parser = parse_id)]
        id: String,
    },
    /// Preview the player form
    Form {
        /// Prefill from an existing player
        #[arg(long, value_name = "ID", value_parser = parse_id)]
        edit: Option<String>,

        #[arg(long, default_value_t = 80)]
        width: u16,

        /// Single-column layout
        #[arg(long)]
        narrow: bool,
    },
}

/// Parse `name=value`. The value may be empty or contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Record ids become one path segment, so blank and dot-only ids are refused.
pub fn parse_id(raw: &str) -> Result<String, String> {
    let id = raw.trim();
    if id.is_empty() || id.chars().all(|c| c == '.') {
        return Err(format!("invalid id '{}'", raw));
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(" p-7 ").unwrap(), "p-7");
        assert_eq!(parse_id("a/b").unwrap(), "a/b");
        assert!(parse_id("").is_err());
        assert!(parse_id("   ").is_err());
        assert!(parse_id("..").is_err());
        assert!(Cli::try_parse_from(["turfdesk", "turf", "."]).is_err());
        assert!(Cli::try_parse_from(["turfdesk", "players", "delete", ".."]).is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=Alice").unwrap(),
            ("name".to_string(), "Alice".to_string())
        );
        assert_eq!(
            parse_assignment("notes=a=b").unwrap(),
            ("notes".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("notes=").unwrap(),
            ("notes".to_string(), String::new())
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_cli_players_add() {
        let cli = Cli::try_parse_from([
            "turfdesk",
            "players",
            "add",
            "--set",
            "name=Alice",
            "--set",
            "age=24",
        ])
        .unwrap();
        match cli.command {
            Command::Players {
                query: None,
                action: Some(PlayerAction::Add { set }),
            } => assert_eq!(set.len(), 2),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_base_url() {
        let cli = Cli::try_parse_from([
            "turfdesk",
            "turfs",
            "--query",
            "arena",
            "--base-url",
            "http://api.test",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://api.test"));
        assert!(matches!(cli.command, Command::Turfs { query: Some(_) }));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
