use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sentinel smart contract analysis service
#[derive(Debug, Parser)]
#[command(name = "sentinel", about = "Smart contract analysis API backed by an LLM and an agent planner")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "sentinel.toml", env = "SENTINEL_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "SENTINEL_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directives, e.g. `info,sentinel_server=debug`
    #[arg(long, default_value = "info", env = "SENTINEL_LOG")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Analyze one contract file and print the response envelope
    Analyze {
        /// Contract source file
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        let args = Args::try_parse_from(["sentinel", "--config", "custom.toml"]).unwrap();
        assert_eq!(args.config, PathBuf::from("custom.toml"));
        assert!(args.command.is_none());
    }

    #[test]
    fn analyze_takes_a_file() {
        let args = Args::try_parse_from(["sentinel", "--listen", "127.0.0.1:9000", "analyze", "Vault.sol"]).unwrap();
        assert_eq!(args.listen, Some(SocketAddr::from(([127, 0, 0, 1], 9000))));
        assert!(matches!(args.command, Some(Command::Analyze { file }) if file == PathBuf::from("Vault.sol")));
    }
}
