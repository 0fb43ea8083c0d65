//! 애플리케이션 조립(composition root) 모듈.

use anyhow::{Context, Result};
use tracing::info;

use crate::application::config::Config;
use crate::application::ports::{LanguageModel, LanguageModelFactory, ReviewStore};
use crate::application::usecases::analyze_review::AnalyzeReviewUseCase;
use crate::application::usecases::correct_analysis::CorrectAnalysisUseCase;
use crate::application::usecases::fetch_reviews::FetchReviewsUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::summarize_text::SummarizeTextUseCase;
use crate::application::usecases::upload_reviews::UploadReviewsUseCase;
use crate::infrastructure::adapters::{JsonConfigRepository, ProviderFactoryAdapter};
use crate::infrastructure::storage::SqliteReviewStore;

/// 설정 점검은 LLM/저장소 없이 동작하므로 별도로 조립한다.
pub fn inspect_config_usecase() -> InspectConfigUseCase<'static> {
    static CONFIG_REPO: JsonConfigRepository = JsonConfigRepository;
    InspectConfigUseCase {
        config_repo: &CONFIG_REPO,
    }
}

/// 실행 시점 의존성(설정/LLM/저장소)을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Config,
    llm: Box<dyn LanguageModel>,
    store: Box<dyn ReviewStore>,
}

impl AppComposition {
    /// 외부에서 만든 포트 구현을 주입한다.
    pub fn new(config: Config, llm: Box<dyn LanguageModel>, store: Box<dyn ReviewStore>) -> Self {
        Self { config, llm, store }
    }

    /// 설정에 맞춰 provider와 SQLite 저장소를 생성한다.
    pub fn from_config(config: Config) -> Result<Self> {
        let llm = ProviderFactoryAdapter.build(&config)?;
        let storage_path = config.storage_path();
        let store = SqliteReviewStore::open(&storage_path)
            .with_context(|| format!("failed to open review store at {storage_path}"))?;

        info!(
            provider = llm.id(),
            model = llm.model(),
            storage = %storage_path,
            "composed application"
        );
        Ok(Self::new(config, llm, Box::new(store)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analyze_review_usecase(&self) -> AnalyzeReviewUseCase<'_> {
        AnalyzeReviewUseCase {
            config: &self.config,
            llm: self.llm.as_ref(),
        }
    }

    pub fn upload_reviews_usecase(&self) -> UploadReviewsUseCase<'_> {
        UploadReviewsUseCase {
            config: &self.config,
            llm: self.llm.as_ref(),
            store: self.store.as_ref(),
        }
    }

    pub fn correct_analysis_usecase(&self) -> CorrectAnalysisUseCase<'_> {
        CorrectAnalysisUseCase {
            llm: self.llm.as_ref(),
            store: self.store.as_ref(),
        }
    }

    pub fn fetch_reviews_usecase(&self) -> FetchReviewsUseCase<'_> {
        FetchReviewsUseCase {
            llm: self.llm.as_ref(),
            store: self.store.as_ref(),
        }
    }

    pub fn summarize_text_usecase(&self) -> SummarizeTextUseCase<'_> {
        SummarizeTextUseCase {
            config: &self.config,
            llm: self.llm.as_ref(),
        }
    }
}
