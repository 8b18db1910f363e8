use clap::Parser;
use std::path::PathBuf;

/// Klaw console host - serves the console UI and its runtime configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "klaw-console", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "KLAW_CONSOLE_CONFIG", default_value = "klaw-console.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "KLAW_CONSOLE_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "KLAW_CONSOLE_PORT")]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["klaw-console"]);
        assert_eq!(cli.config, PathBuf::from("klaw-console.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "klaw-console",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        let result = Cli::try_parse_from(["klaw-console", "--port", "not-a-port"]);
        assert!(result.is_err());
    }
}
