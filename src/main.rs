//! `reviewlens` 바이너리 진입점.

use reviewlens::interface::cli::{Cli, CliAction};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let action = Cli::parse_action();
    let default_filter = match action {
        CliAction::Serve(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match action {
        CliAction::InspectConfig => match reviewlens::inspect_config_pretty_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Analyze(text) => {
            let rendered = reviewlens::analyze_review(&text)
                .await
                .and_then(|analysis| Ok(serde_json::to_string_pretty(&analysis)?));
            match rendered {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Serve(options) => {
            if let Err(err) = reviewlens::serve(options).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
