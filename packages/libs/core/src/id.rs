//! ID 생성
//!
//! Upsert 시 비어있는 PK에 새 ID를 채웁니다.
//!
//! 생성기는 주입되는 collaborator입니다. 실제 서비스는 ULID를 사용하고,
//! 테스트에서는 고정 ID 시퀀스를 주입해 결정적으로 검증합니다.

use std::collections::VecDeque;
use std::sync::Mutex;

/// 전역 유일 ID 생성기
pub trait IdSource: Send + Sync {
    /// 새 ID 생성. 비어있는 PK 하나당 정확히 한 번 호출됩니다.
    fn generate(&self) -> String;
}

/// ULID 기반 기본 생성기 (시간순 정렬 가능한 26자 문자열)
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidIdSource;

impl IdSource for UlidIdSource {
    fn generate(&self) -> String {
        ulid::Ulid::new().to_string()
    }
}

/// 고정 ID 시퀀스 생성기 (테스트용)
///
/// 주어진 ID를 순서대로 반환하고, 소진되면 일련번호가 붙은 ID를 반환합니다.
pub struct FixedIdSource {
    ids: Mutex<VecDeque<String>>,
    fallback_seq: Mutex<u64>,
}

impl FixedIdSource {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
            fallback_seq: Mutex::new(0),
        }
    }
}

impl IdSource for FixedIdSource {
    fn generate(&self) -> String {
        if let Some(id) = self.ids.lock().unwrap().pop_front() {
            return id;
        }
        let mut seq = self.fallback_seq.lock().unwrap();
        *seq += 1;
        format!("fixed-{}", *seq)
    }
}
