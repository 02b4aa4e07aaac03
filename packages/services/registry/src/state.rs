//! Registry 앱 상태

use crate::config::Config;
use crate::store::ApiStore;

/// 앱 상태
///
/// 모든 핸들러에서 공유하는 상태입니다.
pub struct AppState {
    /// api 저장소
    pub store: ApiStore,
}

impl AppState {
    /// 새 상태 생성
    ///
    /// DB에 연결하고 api 테이블/인덱스를 준비합니다. 실패하면 기동을 중단합니다.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = ApiStore::connect(&config.db_url, config.db_max_connections).await?;
        Ok(Self { store })
    }
}
