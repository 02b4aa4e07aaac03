//! adk-core: Apidock 공통 핵심 라이브러리
//!
//! 이 크레이트는 SQL 레이어와 Registry 서비스가 공유하는 핵심 타입을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `api`: Api 레코드와 api 테이블 스키마 정의
//! - `schema`: 컬럼/테이블 메타데이터와 DDL 렌더링
//! - `error`: 공통 에러 타입
//! - `id`: ID 생성기 (주입형, 기본 ULID)
//! - `clock`: epoch seconds 시계 (주입형)

pub mod api;
pub mod clock;
pub mod error;
pub mod id;
pub mod schema;

pub use error::{Error, Result};
