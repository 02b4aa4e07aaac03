//! 테이블 정의
//!
//! 컬럼의 순서 있는 집합과 테이블 단위 DDL/projection 렌더링입니다.
//! 컬럼 순서는 INSERT 컬럼 목록과 Upsert 인자 순서의 계약이므로
//! 이 스키마 인스턴스가 생성하는 모든 문장에서 동일하게 유지됩니다.

use super::column::ColumnMeta;

/// 테이블 스키마
///
/// Invariant: primary 컬럼은 정확히 하나여야 합니다.
#[derive(Debug, Clone)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnMeta>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMeta>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// primary 컬럼 조회
    pub fn primary_column(&self) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.primary)
    }

    /// 테이블 생성문. `if not exists`라 startup마다 재실행해도 안전합니다.
    pub fn create_table_ddl(&self) -> String {
        let mut buf = String::new();
        buf.push_str(&format!("create table if not exists {}(\n", self.name));
        for (i, col) in self.columns.iter().enumerate() {
            buf.push_str(&col.column_ddl());
            if i < self.columns.len() - 1 {
                buf.push(',');
            }
            buf.push('\n');
        }
        buf.push_str(");");
        buf
    }

    /// 인덱스 생성문 목록. 각 문장은 독립적으로 실행됩니다.
    pub fn index_table_ddl(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.indexed)
            .filter_map(|c| c.index_ddl(&self.name))
            .collect()
    }

    /// SELECT projection 절 (모든 컬럼, 선언 순서)
    pub fn projection_clause(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.projection_expr())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// INSERT 컬럼 목록. 이 순서가 Upsert 인자 순서의 계약입니다.
    pub fn columns_string(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// ON CONFLICT merge 절
    ///
    /// primary 컬럼과 write-once인 create_time은 merge 대상에서 제외합니다.
    /// update_time은 GREATEST로 병합해 뒤로 돌아가지 않습니다.
    pub fn conflict_clause(&self) -> Option<String> {
        let primary = self.primary_column()?;
        let sets = self
            .columns
            .iter()
            .filter(|c| !c.primary && c.name != "create_time")
            .map(|c| {
                if c.name == "update_time" {
                    format!(
                        "update_time = GREATEST({}.update_time, excluded.update_time)",
                        self.name
                    )
                } else {
                    format!("{} = excluded.{}", c.name, c.name)
                }
            })
            .collect::<Vec<_>>();
        Some(format!(
            "on conflict ({})\ndo update set\n{};",
            primary.name,
            sets.join(",\n")
        ))
    }
}
