//! Command-line interface definitions using clap

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{run_decode, run_encode, run_hash_password};

use crate::config::DEFAULT_CONFIG_PATH;

/// linkshrink - a minimal URL shortener
#[derive(Parser, Debug)]
#[command(name = "linkshrink")]
#[command(version)]
#[command(about = "A minimal URL shortener", long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print an Argon2id hash of a password for the `password` config key
    ///
    /// Prompts for the password when it is not given.
    HashPassword {
        password: Option<String>,
    },

    /// Encode a numeric identifier into its short form
    Encode {
        id: u32,
    },

    /// Decode a short identifier into its numeric form
    Decode {
        code: String,
    },
}

impl Cli {
    /// 未指定子命令时启动服务器
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["linkshrink"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert_eq!(cli.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["linkshrink", "-c", "/etc/linkshrink.json", "serve"]);
        assert_eq!(cli.config, PathBuf::from("/etc/linkshrink.json"));
        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn test_codec_commands() {
        let cli = Cli::parse_from(["linkshrink", "encode", "4294967295"]);
        assert_eq!(cli.command(), Commands::Encode { id: u32::MAX });

        let cli = Cli::parse_from(["linkshrink", "decode", "4zzzzzz"]);
        assert_eq!(
            cli.command(),
            Commands::Decode {
                code: "4zzzzzz".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_out_of_range_id() {
        assert!(Cli::try_parse_from(["linkshrink", "encode", "4294967296"]).is_err());
    }
}
