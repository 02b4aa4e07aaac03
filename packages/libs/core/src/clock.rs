//! 시각 소스
//!
//! create_time/update_time 채움에 사용하는 epoch seconds 시계입니다.
//! ID 생성기와 같은 이유로 주입되는 collaborator입니다.

/// 현재 시각 (epoch seconds) 제공자
pub trait Clock: Send + Sync {
    fn now_epoch(&self) -> i64;
}

/// 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// 고정 시계 (테스트용)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch(&self) -> i64 {
        self.0
    }
}
