//! 적용 중인 서비스 설정(경로/provider 인증 출처)을 확인하는 유스케이스.

use anyhow::{Context, Result};

use crate::application::ports::ConfigRepository;

/// 병합된 설정 진단 결과를 JSON 문자열로 돌려준다. 비밀값은 포함하지 않는다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl InspectConfigUseCase<'_> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo
            .inspect_pretty_json()
            .context("failed to inspect reviewlens config")
    }
}
