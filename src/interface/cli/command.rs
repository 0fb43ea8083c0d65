//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::application::config::Config;

#[derive(Debug, Parser)]
#[command(name = "reviewlens")]
#[command(about = "Category sentiment analysis service for product reviews")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP API server (default)
    Serve {
        /// Bind address, overrides server.host
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overrides server.port
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database path, overrides storage.path
        #[arg(long)]
        db: Option<String>,
    },
    /// Show effective merged config and provider credential status
    Config,
    /// Analyze a single review and print the result as JSON
    Analyze {
        /// Review text
        text: String,
    },
}

/// 설정 파일 위에 덮어쓸 서버 실행 옵션.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<String>,
}

impl ServeOptions {
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = Some(host);
        }
        if let Some(port) = self.port {
            config.server.port = Some(port);
        }
        if let Some(db) = self.db {
            config.storage.path = Some(db);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Serve(ServeOptions),
    InspectConfig,
    Analyze(String),
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            None => CliAction::Serve(ServeOptions::default()),
            Some(Commands::Serve { host, port, db }) => {
                CliAction::Serve(ServeOptions { host, port, db })
            }
            Some(Commands::Config) => CliAction::InspectConfig,
            Some(Commands::Analyze { text }) => CliAction::Analyze(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> CliAction {
        Cli::try_parse_from(args).unwrap().into_action()
    }

    #[test]
    fn no_subcommand_means_serve() {
        assert_eq!(action(&["reviewlens"]), CliAction::Serve(ServeOptions::default()));
    }

    #[test]
    fn serve_flags_override_config() {
        let CliAction::Serve(options) =
            action(&["reviewlens", "serve", "--port", "8080", "--db", ":memory:"])
        else {
            panic!("expected serve");
        };

        let mut config = Config::default();
        config.server.host = Some("0.0.0.0".to_string());
        options.apply(&mut config);

        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.storage_path(), ":memory:");
    }

    #[test]
    fn analyze_takes_review_text() {
        assert_eq!(
            action(&["reviewlens", "analyze", "fast shipping"]),
            CliAction::Analyze("fast shipping".to_string())
        );
    }
}
