//! 컬럼 정의
//!
//! 테이블 컬럼 하나의 메타데이터와 그 컬럼에 대한 DDL 렌더링을 정의합니다.
//! 렌더링은 전부 순수 함수입니다.

use super::types::ColumnKind;

/// 컬럼 메타데이터
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    /// 컬럼 이름 (테이블 내 유일)
    pub name: String,

    /// 논리적 타입
    pub kind: ColumnKind,

    /// PK 여부 (테이블당 하나)
    pub primary: bool,

    /// 인덱스 생성 여부
    pub indexed: bool,

    /// 유니크 인덱스 여부
    pub unique: bool,

    /// 테이블 생성 시에만 쓰이는 기본값 (SQL 표현식)
    pub default_expr: Option<String>,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            primary: false,
            indexed: false,
            unique: false,
            default_expr: None,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default_expr = Some(expr.into());
        self
    }

    /// CREATE TABLE 안의 컬럼 정의 절
    pub fn column_ddl(&self) -> String {
        let mut parts = vec![self.name.clone(), self.kind.pg_type().to_string()];
        if self.primary {
            parts.push("primary key".to_string());
        }
        if let Some(expr) = &self.default_expr {
            parts.push(format!("default {}", expr));
        }
        parts.join(" ")
    }

    /// SELECT projection 표현식
    pub fn projection_expr(&self) -> String {
        self.kind.projection_expr(&self.name)
    }

    /// 인덱스 생성문. PK 컬럼은 인덱스를 따로 만들지 않습니다.
    pub fn index_ddl(&self, table: &str) -> Option<String> {
        if self.primary {
            return None;
        }
        let unique = if self.unique { "unique " } else { "" };
        Some(format!(
            "create {}index if not exists {}_{}_index on {} using {};",
            unique,
            table,
            self.name,
            table,
            self.kind.index_engine(&self.name)
        ))
    }
}
