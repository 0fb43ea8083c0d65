//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{Config, ProviderKind};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub effective: EffectiveSettings,
    pub providers: Vec<ProviderInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub storage_path: String,
    pub provider: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub batch_concurrency: usize,
    pub max_batch_size: usize,
    pub max_review_chars: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub id: String,
    pub configured: bool,
    pub enabled: bool,
    pub selected: bool,
    pub model: String,
    pub api_base: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            effective: EffectiveSettings::from_config(config),
            providers: ProviderKind::ALL
                .into_iter()
                .map(|kind| ProviderInspection::from_config(config, kind))
                .collect(),
        }
    }
}

impl EffectiveSettings {
    fn from_config(config: &Config) -> Self {
        Self {
            host: config.host(),
            port: config.port(),
            cors_origins: config.cors_origins(),
            storage_path: config.storage_path(),
            provider: config.provider_kind().id().to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            timeout_secs: config.timeout_secs(),
            batch_concurrency: config.batch_concurrency(),
            max_batch_size: config.max_batch_size(),
            max_review_chars: config.max_review_chars(),
        }
    }
}

impl ProviderInspection {
    fn from_config(config: &Config, kind: ProviderKind) -> Self {
        let cfg = config.providers.get(kind);
        let credential = resolve_provider_api_key(kind, cfg);

        Self {
            id: kind.id().to_string(),
            configured: cfg.is_some(),
            enabled: cfg.map(|c| c.is_enabled()).unwrap_or(true),
            selected: config.provider_kind() == kind,
            model: cfg
                .and_then(|c| c.model.clone())
                .unwrap_or_else(|| kind.default_model().to_string()),
            api_base: cfg
                .and_then(|c| c.api_base.clone())
                .unwrap_or_else(|| kind.default_api_base().to_string()),
            api_key_resolved: credential.credential.is_some(),
            api_key_source: credential.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::config::ProviderConfig;

    #[test]
    fn inspection_never_contains_the_secret() {
        let mut config = Config::default();
        config.llm.provider = Some("gemini".to_string());
        config.providers.gemini = Some(ProviderConfig {
            api_key: Some("super-secret-value".to_string()),
            ..Default::default()
        });

        let inspection = ConfigInspection::from_loaded(LoadedConfig {
            config,
            searched_paths: vec![PathBuf::from("a.json")],
            loaded_paths: vec![],
        });
        let json = serde_json::to_string(&inspection).unwrap();

        assert!(!json.contains("super-secret-value"));
        let gemini = inspection
            .providers
            .iter()
            .find(|p| p.id == "gemini")
            .unwrap();
        assert!(gemini.selected);
        assert!(gemini.api_key_resolved);
        assert_eq!(gemini.api_key_source.as_deref(), Some("inline"));
        assert_eq!(inspection.effective.provider, "gemini");
    }
}
