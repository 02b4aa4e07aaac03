//! api CRUD 핸들러
//!
//! `/api` 아래의 생성/조회/목록/수정/삭제 엔드포인트입니다.
//! 요청 검증은 여기서 끝내고, 저장소에는 정규화된 요청만 넘깁니다.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use adk_core::api::{Api, ListApiRequest};
use adk_core::Error;

use crate::error::Result;
use crate::state::AppState;

const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// 생성/수정 요청 본문
#[derive(Debug, Deserialize)]
pub struct ApisPayload {
    /// 저장할 api 목록
    #[serde(default)]
    pub apis: Vec<Api>,
}

/// 생성 응답 본문
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    /// 저장된 순서 그대로의 id 목록
    pub ids: Vec<String>,
}

/// 조회/목록 응답 본문
#[derive(Debug, Serialize)]
pub struct ApisResponse {
    pub apis: Vec<Api>,
}

/// header 목록 응답 본문
#[derive(Debug, Serialize)]
pub struct HeadersResponse {
    pub headers: Vec<KeyValue>,
}

#[derive(Debug, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// 목록 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// "1" 또는 "true"면 count만 조회
    pub header: Option<String>,

    /// 쉼표로 구분된 name 필터
    pub names: Option<String>,

    pub current_page: Option<i64>,
    pub page_size: Option<i64>,
}

/// POST /api
pub async fn create_apis(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ApisPayload>,
) -> Result<Json<CreateResponse>> {
    if payload.apis.is_empty() {
        return Err(Error::invalid_parameter("apis must not be empty").into());
    }

    let ids = state.store.create(payload.apis).await?;
    Ok(Json(CreateResponse { ids }))
}

/// GET /api/{ids}
pub async fn get_apis(
    State(state): State<Arc<AppState>>,
    Path(ids): Path<String>,
) -> Result<Json<ApisResponse>> {
    let ids = split_csv(&ids);
    if ids.is_empty() {
        return Err(Error::invalid_parameter("ids must not be empty").into());
    }

    let apis = state.store.get(&ids).await?;
    Ok(Json(ApisResponse { apis }))
}

/// GET /api
///
/// `header=1`이면 row 대신 총 개수를 `X-Total-Count` 헤더와 본문 양쪽에 싣습니다.
pub async fn list_apis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let req = list_request(params);

    if req.header {
        let total = state.store.count(&req).await?;
        let body = HeadersResponse {
            headers: vec![KeyValue {
                key: TOTAL_COUNT_HEADER.to_string(),
                value: total.to_string(),
            }],
        };
        return Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(body)).into_response());
    }

    let apis = state.store.list(&req).await?;
    Ok(Json(ApisResponse { apis }).into_response())
}

/// HEAD /api
///
/// 본문 없이 `X-Total-Count` 헤더만 돌려줍니다.
pub async fn head_apis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let mut req = list_request(params);
    req.header = true;

    let total = state.store.count(&req).await?;
    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], ()).into_response())
}

/// PUT /api
pub async fn update_apis(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ApisPayload>,
) -> Result<Json<Value>> {
    if payload.apis.is_empty() {
        return Err(Error::invalid_parameter("apis must not be empty").into());
    }

    state.store.update(payload.apis).await?;
    Ok(Json(json!({})))
}

/// DELETE /api/{ids}
pub async fn delete_apis(
    State(state): State<Arc<AppState>>,
    Path(ids): Path<String>,
) -> Result<Json<Value>> {
    let ids = split_csv(&ids);
    if ids.is_empty() {
        return Err(Error::invalid_parameter("ids must not be empty").into());
    }

    state.store.delete(&ids).await?;
    Ok(Json(json!({})))
}

/// 쿼리 파라미터를 정규화된 목록 요청으로 변환
///
/// 음수 페이지는 0으로, 0 이하의 페이지 크기는 10으로 보정합니다.
fn list_request(params: ListParams) -> ListApiRequest {
    let mut req = ListApiRequest {
        header: params
            .header
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false),
        names: split_csv(params.names.as_deref().unwrap_or_default()),
        current_page: params.current_page.unwrap_or(0),
        page_size: params.page_size.unwrap_or(10),
    };

    if req.current_page < 0 {
        req.current_page = 0;
    }
    if req.page_size <= 0 {
        req.page_size = 10;
    }
    req
}

/// 쉼표 구분 문자열 파싱. 공백과 빈 항목은 버립니다.
fn split_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv_trims_and_drops_blanks() {
        assert_eq!(split_csv("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(split_csv("").is_empty());
        assert!(split_csv(" , ").is_empty());
    }

    #[test]
    fn test_list_request_defaults() {
        let req = list_request(ListParams::default());

        assert!(!req.header);
        assert!(req.names.is_empty());
        assert_eq!(req.current_page, 0);
        assert_eq!(req.page_size, 10);
    }

    #[test]
    fn test_list_request_clamps_page_values() {
        let req = list_request(ListParams {
            current_page: Some(-3),
            page_size: Some(0),
            ..Default::default()
        });

        assert_eq!(req.current_page, 0);
        assert_eq!(req.page_size, 10);
    }

    #[test]
    fn test_list_request_header_forms() {
        for raw in ["1", "true"] {
            let req = list_request(ListParams {
                header: Some(raw.to_string()),
                ..Default::default()
            });
            assert!(req.header);
        }

        let req = list_request(ListParams {
            header: Some("0".to_string()),
            ..Default::default()
        });
        assert!(!req.header);
    }

    #[test]
    fn test_list_request_splits_names() {
        let req = list_request(ListParams {
            names: Some("svc-a,svc-b".to_string()),
            ..Default::default()
        });

        assert_eq!(req.names, vec!["svc-a", "svc-b"]);
    }
}
