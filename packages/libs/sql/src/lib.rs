//! adk-sql: api 테이블 SQL 생성/디코딩 라이브러리
//!
//! 테이블 스키마에서 런타임에 SQL 문장을 생성하고, 조회 결과 row를
//! 도메인 레코드로 복원합니다. 값은 전부 placeholder로 바인딩합니다.
//!
//! # 모듈 구조
//!
//! - `builder`: Upsert/List/Get/Delete 문장 빌더
//! - `row`: 조회 row → [`adk_core::api::Api`] 디코더

pub mod builder;
pub mod row;

pub use builder::{ApiQueries, SqlValue};
pub use row::{decode_api, RowRead};
