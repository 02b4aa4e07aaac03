//! api CRUD SQL 빌더
//!
//! api 테이블 스키마에서 Upsert/List/Get/Delete 문장을 생성합니다.
//! 값은 전부 positional placeholder(`$n`)로 바인딩하며,
//! 문장 텍스트와 바인딩 값 목록을 함께 반환합니다.

use std::collections::HashMap;

use adk_core::api::{api_table, Api, ListApiRequest};
use adk_core::clock::Clock;
use adk_core::id::IdSource;
use adk_core::schema::TableSchema;
use adk_core::{Error, Result};

/// 바인딩 값
///
/// 실행 시점에 driver 타입으로 매핑됩니다. JSON 컬럼은 비어있을 때
/// NULL로 바인딩해야 하므로 `OptText`로 구분합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// character varying
    Text(String),

    /// NULL 허용 문자열 (JSON 인코딩 컬럼)
    OptText(Option<String>),

    /// int
    Int(i32),

    /// bigint
    Bigint(i64),

    /// character varying[] (네이티브 배열 바인딩)
    TextArray(Vec<String>),
}

/// api 테이블 쿼리 빌더
pub struct ApiQueries {
    table: TableSchema,
}

impl Default for ApiQueries {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiQueries {
    pub fn new() -> Self {
        Self { table: api_table() }
    }

    pub fn table(&self) -> &TableSchema {
        &self.table
    }

    /// Upsert 문장 생성
    ///
    /// 비어있는 id와 0인 시각을 먼저 채운 뒤(입력 순서대로), 컬럼 선언
    /// 순서 그대로 인자를 쌓습니다. 시계는 호출당 한 번만 읽어 같은 호출의
    /// 모든 row가 같은 시각을 공유합니다. map 컬럼 JSON 인코딩이 실패하면
    /// 문장 없이 에러를 반환합니다.
    pub fn upsert(
        &self,
        apis: &mut [Api],
        ids: &dyn IdSource,
        clock: &dyn Clock,
    ) -> Result<(String, Vec<SqlValue>)> {
        let conflict = self
            .table
            .conflict_clause()
            .ok_or_else(|| Error::invalid_parameter("api table has no primary key column"))?;

        let width = self.table.columns().len();
        let now = clock.now_epoch();

        let mut rows = Vec::with_capacity(apis.len());
        let mut values = Vec::with_capacity(apis.len() * width);

        for (i, api) in apis.iter_mut().enumerate() {
            if api.id.is_empty() {
                api.id = ids.generate();
            }
            if api.create_time == 0 {
                api.create_time = now;
            }
            if api.update_time == 0 {
                api.update_time = now;
            }

            let headers = encode_map(&api.headers)?;
            let path_params = encode_map(&api.path_params)?;
            let url_params = encode_map(&api.url_params)?;
            let auth = encode_auth(api.auth.as_ref())?;

            rows.push(values_placeholder(i * width, width));
            values.push(SqlValue::Text(api.id.clone()));
            values.push(SqlValue::Text(api.name.clone()));
            values.push(SqlValue::Text(api.description.clone()));
            values.push(SqlValue::TextArray(api.member_ids.clone()));
            values.push(SqlValue::Text(api.method.clone()));
            values.push(SqlValue::Text(api.url.clone()));
            values.push(SqlValue::OptText(headers));
            values.push(SqlValue::OptText(path_params));
            values.push(SqlValue::OptText(url_params));
            values.push(SqlValue::OptText(auth));
            values.push(SqlValue::Text(api.body.clone()));
            values.push(SqlValue::Int(api.timeout));
            values.push(SqlValue::TextArray(api.directories.clone()));
            values.push(SqlValue::Bigint(api.create_time));
            values.push(SqlValue::Bigint(api.update_time));
        }

        let statement = format!(
            "insert into {} ({}) values {} {}",
            self.table.name(),
            self.table.columns_string(),
            rows.join(","),
            conflict
        );
        Ok((statement, values))
    }

    /// List 문장 생성
    ///
    /// header 요청이면 count(1)만, 아니면 projection으로 조회합니다.
    /// name in-filter가 유일한 조건이며, 페이지네이션은 row 조회에만 붙습니다.
    pub fn list(&self, req: &ListApiRequest) -> (String, Vec<SqlValue>) {
        let mut buf = String::new();
        let mut values = Vec::new();

        if req.header {
            buf.push_str(&format!("select count(1) from {}", self.table.name()));
        } else {
            buf.push_str(&format!(
                "select {} from {}",
                self.table.projection_clause(),
                self.table.name()
            ));
        }

        if !req.names.is_empty() {
            buf.push_str(&format!(
                " where name in ({})",
                placeholders(0, req.names.len())
            ));
            values.extend(req.names.iter().cloned().map(SqlValue::Text));
        }

        if !req.header {
            buf.push_str(&format!(
                " offset {} limit {}",
                req.current_page * req.page_size,
                req.page_size
            ));
        }

        buf.push(';');
        (buf, values)
    }

    /// Get 문장 생성. 빈 ids 거부는 호출자 몫입니다.
    pub fn get(&self, ids: &[String]) -> (String, Vec<SqlValue>) {
        let statement = format!(
            "select {} from {} where id in ({});",
            self.table.projection_clause(),
            self.table.name(),
            placeholders(0, ids.len())
        );
        (statement, ids.iter().cloned().map(SqlValue::Text).collect())
    }

    /// Delete 문장 생성. 빈 ids 거부는 호출자 몫입니다.
    pub fn delete(&self, ids: &[String]) -> (String, Vec<SqlValue>) {
        let statement = format!(
            "delete from {} where id in ({});",
            self.table.name(),
            placeholders(0, ids.len())
        );
        (statement, ids.iter().cloned().map(SqlValue::Text).collect())
    }
}

/// `$offset+1 .. $offset+count` placeholder 목록
fn placeholders(offset: usize, count: usize) -> String {
    (1..=count)
        .map(|i| format!("${}", offset + i))
        .collect::<Vec<_>>()
        .join(",")
}

/// row 하나 분량의 placeholder 묶음 `($n,...)`
fn values_placeholder(offset: usize, width: usize) -> String {
    format!("({})", placeholders(offset, width))
}

/// map 컬럼 JSON 인코딩. 빈 map은 NULL로 바인딩합니다.
fn encode_map(map: &HashMap<String, String>) -> Result<Option<String>> {
    if map.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(map)?))
}

/// auth 컬럼 JSON 인코딩. 값이 없으면 NULL로 바인딩합니다.
fn encode_auth(auth: Option<&serde_json::Value>) -> Result<Option<String>> {
    match auth {
        Some(value) => Ok(Some(serde_json::to_string(value)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use adk_core::clock::FixedClock;
    use adk_core::id::FixedIdSource;

    use super::*;

    fn api_named(name: &str) -> Api {
        Api {
            name: name.to_string(),
            method: "GET".to_string(),
            url: format!("http://{}", name),
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_assigns_missing_ids_and_times() {
        let queries = ApiQueries::new();
        let ids = FixedIdSource::new(["a1", "a2"]);
        let clock = FixedClock(1_700_000_000);

        let mut apis = vec![api_named("one"), api_named("two")];
        queries.upsert(&mut apis, &ids, &clock).unwrap();

        assert_eq!(apis[0].id, "a1");
        assert_eq!(apis[1].id, "a2");
        assert_eq!(apis[0].create_time, 1_700_000_000);
        assert_eq!(apis[0].update_time, 1_700_000_000);
        assert_eq!(apis[1].create_time, apis[0].create_time);
    }

    #[test]
    fn test_upsert_keeps_caller_supplied_id_and_times() {
        let queries = ApiQueries::new();
        let ids = FixedIdSource::new(["unused"]);
        let clock = FixedClock(9_999);

        let mut apis = vec![Api {
            id: "existing".to_string(),
            create_time: 100,
            update_time: 200,
            ..api_named("keep")
        }];
        queries.upsert(&mut apis, &ids, &clock).unwrap();

        assert_eq!(apis[0].id, "existing");
        assert_eq!(apis[0].create_time, 100);
        assert_eq!(apis[0].update_time, 200);
    }

    #[test]
    fn test_upsert_values_follow_column_order() {
        let queries = ApiQueries::new();
        let ids = FixedIdSource::new(["a1"]);
        let clock = FixedClock(1_700_000_000);

        let mut apis = vec![Api {
            member_ids: vec!["m1".to_string(), "m2".to_string()],
            timeout: 30,
            ..api_named("svc")
        }];
        let (statement, values) = queries.upsert(&mut apis, &ids, &clock).unwrap();

        assert_eq!(values.len(), 15);
        assert_eq!(values[0], SqlValue::Text("a1".to_string()));
        assert_eq!(values[1], SqlValue::Text("svc".to_string()));
        assert_eq!(
            values[3],
            SqlValue::TextArray(vec!["m1".to_string(), "m2".to_string()])
        );
        assert_eq!(values[11], SqlValue::Int(30));
        assert_eq!(values[13], SqlValue::Bigint(1_700_000_000));
        assert_eq!(values[14], SqlValue::Bigint(1_700_000_000));

        assert!(statement.starts_with(
            "insert into api (id,name,description,member_ids,method,url,headers,path_params,url_params,auth,body,timeout,directories,create_time,update_time) values "
        ));
        assert!(statement.contains("($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15)"));
    }

    #[test]
    fn test_upsert_multi_row_placeholders_continue_numbering() {
        let queries = ApiQueries::new();
        let ids = FixedIdSource::new(["a1", "a2"]);
        let clock = FixedClock(1);

        let mut apis = vec![api_named("one"), api_named("two")];
        let (statement, values) = queries.upsert(&mut apis, &ids, &clock).unwrap();

        assert_eq!(values.len(), 30);
        assert!(statement.contains("($1,"));
        assert!(statement.contains(",($16,"));
        assert!(statement.contains("$30)"));
    }

    #[test]
    fn test_upsert_encodes_maps_and_null_binds_empty_ones() {
        let queries = ApiQueries::new();
        let ids = FixedIdSource::new(["a1"]);
        let clock = FixedClock(1);

        let mut api = api_named("svc");
        api.headers.insert("a".to_string(), "1".to_string());

        let mut apis = vec![api];
        let (_, values) = queries.upsert(&mut apis, &ids, &clock).unwrap();

        assert_eq!(
            values[6],
            SqlValue::OptText(Some(r#"{"a":"1"}"#.to_string()))
        );
        assert_eq!(values[7], SqlValue::OptText(None));
        assert_eq!(values[8], SqlValue::OptText(None));
        assert_eq!(values[9], SqlValue::OptText(None));
    }

    #[test]
    fn test_upsert_conflict_merge_text() {
        let queries = ApiQueries::new();
        let ids = FixedIdSource::new(["a1"]);
        let clock = FixedClock(1);

        let mut apis = vec![api_named("svc")];
        let (statement, _) = queries.upsert(&mut apis, &ids, &clock).unwrap();

        assert!(statement.contains("on conflict (id)"));
        assert!(statement.contains("name = excluded.name"));
        assert!(statement.contains("update_time = GREATEST(api.update_time, excluded.update_time)"));
        assert!(!statement.contains("create_time = excluded.create_time"));
        assert!(!statement.contains("id = excluded.id"));
    }

    #[test]
    fn test_list_header_counts_without_pagination() {
        let queries = ApiQueries::new();
        let (statement, values) = queries.list(&ListApiRequest {
            header: true,
            ..Default::default()
        });

        assert_eq!(statement, "select count(1) from api;");
        assert!(values.is_empty());
    }

    #[test]
    fn test_list_header_with_name_filter() {
        let queries = ApiQueries::new();
        let (statement, values) = queries.list(&ListApiRequest {
            header: true,
            names: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        });

        assert_eq!(statement, "select count(1) from api where name in ($1,$2);");
        assert_eq!(
            values,
            vec![
                SqlValue::Text("a".to_string()),
                SqlValue::Text("b".to_string())
            ]
        );
    }

    #[test]
    fn test_list_rows_paginate_with_offset_and_limit() {
        let queries = ApiQueries::new();
        let (statement, values) = queries.list(&ListApiRequest {
            header: false,
            names: Vec::new(),
            current_page: 2,
            page_size: 10,
        });

        assert!(statement.starts_with("select id,name,"));
        assert!(statement.contains("array_to_string(member_ids, ',') as member_ids"));
        assert!(statement.ends_with(" offset 20 limit 10;"));
        assert!(values.is_empty());
    }

    #[test]
    fn test_get_filters_on_primary_ids() {
        let queries = ApiQueries::new();
        let ids = vec!["x".to_string(), "y".to_string()];
        let (statement, values) = queries.get(&ids);

        assert!(statement.contains(" from api where id in ($1,$2);"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_delete_filters_on_primary_ids() {
        let queries = ApiQueries::new();
        let ids = vec!["x".to_string()];
        let (statement, values) = queries.delete(&ids);

        assert_eq!(statement, "delete from api where id in ($1);");
        assert_eq!(values, vec![SqlValue::Text("x".to_string())]);
    }
}
