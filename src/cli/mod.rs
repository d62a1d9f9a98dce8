use clap::{Parser, Subcommand};

/// Default address the HTTP server listens on
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

#[derive(Parser)]
#[command(name = "cicd-demo")]
#[command(about = "CI/CD pipeline demo HTTP service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// The HTTP server bind address (host:port)
        #[arg(long, env = "CICD_DEMO_BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,
        /// Emit logs as JSON lines instead of human-readable text
        #[arg(long, env = "CICD_DEMO_JSON_LOGS")]
        json_logs: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_start(args: &[&str]) -> (String, bool) {
        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Start {
            bind_address,
            json_logs,
        } = cli.command;
        (bind_address, json_logs)
    }

    // Environment mutation stays in this single test
    #[test]
    fn test_start_defaults_and_environment_overrides() {
        // SAFETY: the other CLI tests never depend on these variables
        unsafe {
            std::env::remove_var("CICD_DEMO_BIND_ADDRESS");
            std::env::remove_var("CICD_DEMO_JSON_LOGS");
        }
        assert_eq!(
            parse_start(&["cicd-demo", "start"]),
            (DEFAULT_BIND_ADDRESS.to_string(), false)
        );

        // SAFETY: as above
        unsafe {
            std::env::set_var("CICD_DEMO_BIND_ADDRESS", "127.0.0.1:9999");
            std::env::set_var("CICD_DEMO_JSON_LOGS", "true");
        }
        assert_eq!(
            parse_start(&["cicd-demo", "start"]),
            ("127.0.0.1:9999".to_string(), true)
        );

        // SAFETY: as above
        unsafe {
            std::env::set_var("CICD_DEMO_JSON_LOGS", "false");
        }
        assert_eq!(
            parse_start(&["cicd-demo", "start"]),
            ("127.0.0.1:9999".to_string(), false)
        );

        // Explicit flags win over the environment
        assert_eq!(
            parse_start(&["cicd-demo", "start", "--bind-address", "10.0.0.1:80"]),
            ("10.0.0.1:80".to_string(), false)
        );

        // SAFETY: as above
        unsafe {
            std::env::remove_var("CICD_DEMO_BIND_ADDRESS");
            std::env::remove_var("CICD_DEMO_JSON_LOGS");
        }
    }

    #[test]
    fn test_start_with_explicit_flags() {
        assert_eq!(
            parse_start(&[
                "cicd-demo",
                "start",
                "--bind-address",
                "127.0.0.1:8080",
                "--json-logs",
            ]),
            ("127.0.0.1:8080".to_string(), true)
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["cicd-demo"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["cicd-demo", "start", "--port", "5000"]).is_err());
    }
}
