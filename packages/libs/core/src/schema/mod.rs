//! 테이블 스키마 메타데이터
//!
//! 컬럼 메타데이터에서 DDL과 projection을 렌더링하는 모델입니다.
//! 스키마가 문장 생성의 단일 출처이므로, 컬럼 순서 계약이
//! DDL/INSERT/SELECT 전반에서 어긋나지 않습니다.
//!
//! # 모듈 구조
//!
//! - `types`: 논리적 타입 정의 (닫힌 enum)
//! - `column`: 컬럼 메타데이터와 컬럼 단위 렌더링
//! - `table`: 테이블 스키마와 테이블 단위 렌더링

mod column;
mod table;
mod types;

pub use column::ColumnMeta;
pub use table::TableSchema;
pub use types::ColumnKind;
