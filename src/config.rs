use std::path::PathBuf;

use clap::Parser;

use crate::error::StartupError;

pub const DEFAULT_PORT: u16 = 8080;
pub const MIN_PORT: u16 = 1024;
pub const MAX_PORT: u16 = 65534;

/// Command line configuration for the file server.
#[derive(Debug, Clone, Parser)]
#[command(name = "conditional_http")]
#[command(about = "Static file server with conditional GET and keep-alive support")]
pub struct Config {
    /// Port to listen on (1024-65534)
    #[arg(default_value_t = DEFAULT_PORT, value_parser = parse_port)]
    pub port: u16,

    /// Directory whose contents are served
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Validates a port argument. Ports below 1024 are reserved and 65535 is excluded.
pub fn parse_port(s: &str) -> Result<u16, StartupError> {
    s.trim()
        .parse::<u16>()
        .ok()
        .filter(|port| (MIN_PORT..=MAX_PORT).contains(port))
        .ok_or_else(|| StartupError::InvalidPort(s.to_string()))
}
