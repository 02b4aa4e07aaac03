//! Api 레코드
//!
//! 저장 대상 도메인 레코드와 요청 타입, 그리고 api 테이블 스키마 정의입니다.
//! 필드 이름이 곧 JSON 키이자 컬럼 이름입니다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnKind, ColumnMeta, TableSchema};

/// api 테이블의 epoch seconds 기본값 표현식
pub const EPOCH_DEFAULT_EXPR: &str = "(date_part('epoch'::text, now()))::bigint";

/// Api 레코드
///
/// create_time/update_time은 epoch seconds이며, 0이면 Upsert가 채웁니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Api {
    /// PK. 비어있으면 Upsert가 생성해 채웁니다.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// 이름 (List의 in-filter 대상)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// 설명
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// 멤버 ID 목록 (네이티브 배열 컬럼)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<String>,

    /// HTTP 메서드
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,

    /// 대상 URL
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// 요청 헤더 (JSON 문자열 컬럼으로 저장)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// path 파라미터 (JSON 문자열 컬럼으로 저장)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub path_params: HashMap<String, String>,

    /// url 파라미터 (JSON 문자열 컬럼으로 저장)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub url_params: HashMap<String, String>,

    /// 인증 정보 (불투명 JSON 값)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<serde_json::Value>,

    /// 요청 본문
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,

    /// 타임아웃 (초)
    pub timeout: i32,

    /// 디렉토리 목록 (네이티브 배열 컬럼)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<String>,

    /// 생성 시각 (epoch seconds, write-once)
    pub create_time: i64,

    /// 갱신 시각 (epoch seconds, GREATEST로 병합)
    pub update_time: i64,
}

/// List 요청
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListApiRequest {
    /// true면 row 대신 count만 조회합니다.
    pub header: bool,

    /// name in-filter (비어있으면 필터 없음)
    pub names: Vec<String>,

    /// 0부터 시작하는 페이지 번호
    pub current_page: i64,

    /// 페이지 크기. 0 이하는 핸들러가 기본값으로 치환한 뒤 전달합니다.
    pub page_size: i64,
}

/// api 테이블 스키마
///
/// 컬럼 선언 순서가 Upsert 인자 순서의 계약입니다.
pub fn api_table() -> TableSchema {
    TableSchema::new(
        "api",
        vec![
            ColumnMeta::new("id", ColumnKind::Text).primary(),
            ColumnMeta::new("name", ColumnKind::Text).indexed(),
            ColumnMeta::new("description", ColumnKind::Text),
            ColumnMeta::new("member_ids", ColumnKind::TextArray),
            ColumnMeta::new("method", ColumnKind::Text),
            ColumnMeta::new("url", ColumnKind::Text),
            ColumnMeta::new("headers", ColumnKind::Text),
            ColumnMeta::new("path_params", ColumnKind::Text),
            ColumnMeta::new("url_params", ColumnKind::Text),
            ColumnMeta::new("auth", ColumnKind::Text),
            ColumnMeta::new("body", ColumnKind::Text),
            ColumnMeta::new("timeout", ColumnKind::Int),
            ColumnMeta::new("directories", ColumnKind::TextArray),
            ColumnMeta::new("create_time", ColumnKind::Bigint).default_expr(EPOCH_DEFAULT_EXPR),
            ColumnMeta::new("update_time", ColumnKind::Bigint).default_expr(EPOCH_DEFAULT_EXPR),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_table_shape() {
        let table = api_table();
        assert_eq!(table.name(), "api");
        assert_eq!(table.columns().len(), 15);

        let primary = table.primary_column().unwrap();
        assert_eq!(primary.name, "id");
        assert_eq!(
            table
                .columns()
                .iter()
                .filter(|c| c.primary)
                .count(),
            1
        );
    }

    #[test]
    fn test_api_table_column_order() {
        assert_eq!(
            api_table().columns_string(),
            "id,name,description,member_ids,method,url,headers,path_params,url_params,auth,body,timeout,directories,create_time,update_time"
        );
    }

    #[test]
    fn test_api_serialization_omits_empty_fields() {
        let api = Api {
            id: "a1".to_string(),
            name: "svc".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&api).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("id").unwrap(), "a1");
        assert_eq!(obj.get("name").unwrap(), "svc");
        assert!(!obj.contains_key("headers"));
        assert!(!obj.contains_key("member_ids"));
        assert!(!obj.contains_key("auth"));
    }

    #[test]
    fn test_api_deserialization_fills_defaults() {
        let api: Api = serde_json::from_str(r#"{"name":"svc","method":"GET"}"#).unwrap();
        assert_eq!(api.name, "svc");
        assert_eq!(api.method, "GET");
        assert!(api.id.is_empty());
        assert_eq!(api.timeout, 0);
        assert_eq!(api.create_time, 0);
        assert!(api.headers.is_empty());
    }
}
