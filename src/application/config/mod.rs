//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";
pub const DEFAULT_STORAGE_PATH: &str = "reviewlens.db";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;
pub const DEFAULT_MAX_REVIEW_CHARS: usize = 5000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP 서버 바인딩/CORS
    #[serde(default)]
    pub server: ServerConfig,
    /// 분석 레코드 저장소
    #[serde(default)]
    pub storage: StorageConfig,
    /// LLM 호출 공통 파라미터
    #[serde(default)]
    pub llm: LlmConfig,
    /// provider별 API 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// 허용할 브라우저 origin 목록
    pub cors_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    /// SQLite 파일 경로(`:memory:` 허용)
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LlmConfig {
    /// 사용할 provider 식별자(openai/anthropic/gemini)
    pub provider: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// HTTP 요청 타임아웃(초)
    pub timeout_secs: Option<u64>,
    /// 일괄 업로드 시 동시 분석 수
    pub batch_concurrency: Option<usize>,
    /// 일괄 업로드 1회 최대 리뷰 수
    pub max_batch_size: Option<usize>,
    /// 리뷰 1건 최대 글자 수
    pub max_review_chars: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub openai: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub gemini: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자(선택)
    pub model: Option<String>,
    /// API 베이스 URL(선택)
    pub api_base: Option<String>,
    /// 인증 키(직접값, 권장하지 않음)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

/// 지원하는 LLM provider 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Anthropic, Self::Gemini];

    pub fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }

    /// 지원값: openai, anthropic/claude, gemini/google
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" | "gpt" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "gemini" | "google" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4-turbo",
            Self::Anthropic => "claude-3-7-sonnet-latest",
            Self::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn default_api_base(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl Config {
    pub fn host(&self) -> String {
        self.server
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.server
            .cors_origins
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()])
    }

    pub fn storage_path(&self) -> String {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string())
    }

    /// 설정된 provider. 미지정/알수없음은 openai.
    pub fn provider_kind(&self) -> ProviderKind {
        self.llm
            .provider
            .as_deref()
            .and_then(ProviderKind::from_config)
            .unwrap_or(ProviderKind::OpenAi)
    }

    pub fn temperature(&self) -> f32 {
        self.llm.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.llm.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.llm.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn batch_concurrency(&self) -> usize {
        self.llm
            .batch_concurrency
            .unwrap_or(DEFAULT_BATCH_CONCURRENCY)
            .max(1)
    }

    pub fn max_batch_size(&self) -> usize {
        self.llm.max_batch_size.unwrap_or(DEFAULT_MAX_BATCH_SIZE)
    }

    pub fn max_review_chars(&self) -> usize {
        self.llm.max_review_chars.unwrap_or(DEFAULT_MAX_REVIEW_CHARS)
    }

    /// 자유 텍스트 요약 입력 한도. 리뷰 여러 건을 합친 글까지 허용한다.
    pub fn max_text_chars(&self) -> usize {
        self.max_review_chars().saturating_mul(self.max_batch_size())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.server.merge_from(other.server);
        self.storage.merge_from(other.storage);
        self.llm.merge_from(other.llm);
        self.providers.merge_from(other.providers);
    }
}

impl ServerConfig {
    pub fn merge_from(&mut self, other: ServerConfig) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.cors_origins.is_some() {
            self.cors_origins = other.cors_origins;
        }
    }
}

impl StorageConfig {
    pub fn merge_from(&mut self, other: StorageConfig) {
        if other.path.is_some() {
            self.path = other.path;
        }
    }
}

impl LlmConfig {
    pub fn merge_from(&mut self, other: LlmConfig) {
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.batch_concurrency.is_some() {
            self.batch_concurrency = other.batch_concurrency;
        }
        if other.max_batch_size.is_some() {
            self.max_batch_size = other.max_batch_size;
        }
        if other.max_review_chars.is_some() {
            self.max_review_chars = other.max_review_chars;
        }
    }
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::Anthropic => self.anthropic.as_ref(),
            ProviderKind::Gemini => self.gemini.as_ref(),
        }
    }

    pub fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider(&mut self.openai, other.openai);
        merge_provider(&mut self.anthropic, other.anthropic);
        merge_provider(&mut self.gemini, other.gemini);
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}

fn merge_provider(slot: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    let Some(incoming) = incoming else {
        return;
    };
    match slot {
        Some(existing) => existing.merge_from(incoming),
        None => *slot = Some(incoming),
    }
}
