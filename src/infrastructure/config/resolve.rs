//! 설정 값(api key/env 등)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{ProviderConfig, ProviderKind};

/// Provider(API key) 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentialResolution {
    pub credential: Option<String>,
    /// 값을 찾은(또는 찾지 못한) 출처 라벨. 비밀값 자체는 담지 않는다.
    pub source: Option<String>,
}

/// Provider API key를 해석한다.
/// 우선순위: inline `api_key` > `api_key_env` > provider 기본 환경변수.
pub fn resolve_provider_api_key(
    kind: ProviderKind,
    cfg: Option<&ProviderConfig>,
) -> ProviderCredentialResolution {
    if let Some(key) = cfg
        .and_then(|c| c.api_key.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return ProviderCredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg
        .and_then(|c| c.api_key_env.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(kind.default_api_key_env());

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ProviderCredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => ProviderCredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_key_wins_over_environment() {
        let cfg = ProviderConfig {
            api_key: Some("  sk-inline  ".to_string()),
            api_key_env: Some("REVIEWLENS_TEST_UNUSED_KEY".to_string()),
            ..Default::default()
        };
        let resolved = resolve_provider_api_key(ProviderKind::OpenAi, Some(&cfg));
        assert_eq!(resolved.credential.as_deref(), Some("sk-inline"));
        assert_eq!(resolved.source.as_deref(), Some("inline"));
    }

    #[test]
    fn missing_env_is_reported_without_a_credential() {
        let cfg = ProviderConfig {
            api_key_env: Some("REVIEWLENS_TEST_SURELY_UNSET_KEY".to_string()),
            ..Default::default()
        };
        let resolved = resolve_provider_api_key(ProviderKind::Gemini, Some(&cfg));
        assert_eq!(resolved.credential, None);
        assert_eq!(
            resolved.source.as_deref(),
            Some("env:REVIEWLENS_TEST_SURELY_UNSET_KEY (missing)")
        );
    }
}
