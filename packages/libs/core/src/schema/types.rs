//! 논리적 컬럼 타입 정의
//!
//! api 테이블이 사용하는 타입 집합을 닫힌 enum으로 정의합니다.
//! projection과 인덱스 엔진 선택은 이 enum에 대한 exhaustive match로
//! 수행되므로 타입 추가 시 컴파일 타임에 누락이 드러납니다.

/// 논리적 컬럼 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 문자열 (character varying)
    Text,

    /// 32비트 정수
    Int,

    /// 64비트 정수 (epoch seconds 타임스탬프 포함)
    Bigint,

    /// 문자열 배열 (네이티브 varchar[])
    TextArray,

    /// 정수 배열 (네이티브 integer[])
    IntArray,

    /// 공간 타입 (PostGIS geometry)
    Geometry,
}

impl ColumnKind {
    /// Postgres 타입 문자열
    pub fn pg_type(&self) -> &'static str {
        match self {
            ColumnKind::Text => "character varying",
            ColumnKind::Int => "int",
            ColumnKind::Bigint => "bigint",
            ColumnKind::TextArray => "character varying[]",
            ColumnKind::IntArray => "integer[]",
            ColumnKind::Geometry => "geometry",
        }
    }

    /// SELECT projection 표현식
    ///
    /// 배열은 comma-joined 문자열, geometry는 GeoJSON으로 변환해
    /// 원래 컬럼 이름으로 alias합니다. 스칼라는 컬럼 이름 그대로입니다.
    pub fn projection_expr(&self, name: &str) -> String {
        match self {
            ColumnKind::Text | ColumnKind::Int | ColumnKind::Bigint => name.to_string(),
            ColumnKind::Geometry => format!("st_asgeojson({}) as {}", name, name),
            ColumnKind::TextArray | ColumnKind::IntArray => {
                format!("array_to_string({}, ',') as {}", name, name)
            }
        }
    }

    /// 인덱스 엔진 절 (`using` 뒤에 오는 부분)
    pub fn index_engine(&self, name: &str) -> String {
        match self {
            ColumnKind::Text
            | ColumnKind::Int
            | ColumnKind::Bigint
            | ColumnKind::TextArray
            | ColumnKind::IntArray => format!("btree({})", name),
            ColumnKind::Geometry => format!("gist (geography({}))", name),
        }
    }
}
