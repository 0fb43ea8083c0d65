//! reviewlens library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::config::Config;
use application::ports::ConfigRepository;
use domain::record::ReviewAnalysis;
use infrastructure::adapters::JsonConfigRepository;
use infrastructure::storage::IN_MEMORY_PATH;
use interface::cli::ServeOptions;
use interface::composition::{AppComposition, inspect_config_usecase};

fn load_config() -> Result<Config> {
    JsonConfigRepository.load()
}

/// 설정을 읽어 HTTP 서버를 실행한다.
pub async fn serve(options: ServeOptions) -> Result<()> {
    let mut config = load_config()?;
    options.apply(&mut config);

    let host = config.host();
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("invalid server host: {host}"))?;
    let addr = SocketAddr::new(ip, config.port());

    let composition = AppComposition::from_config(config)?;
    interface::http::serve(Arc::new(composition), addr).await
}

/// 리뷰 1건을 분석한다. 결과는 저장하지 않는다.
pub async fn analyze_review(text: &str) -> Result<ReviewAnalysis> {
    let mut config = load_config()?;
    config.storage.path = Some(IN_MEMORY_PATH.to_string());

    let composition = AppComposition::from_config(config)?;
    let analysis = composition
        .analyze_review_usecase()
        .execute(Some(text))
        .await?;
    Ok(analysis)
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    inspect_config_usecase().execute()
}
