//! 조회 row 디코딩
//!
//! driver row 타입에 직접 의존하지 않도록, 컬럼 접근을 [`RowRead`]로
//! 추상화합니다. 실행 크레이트가 자기 row 타입에 이 trait를 붙이면
//! [`decode_api`]가 projection 결과를 [`Api`]로 복원합니다.

use std::collections::HashMap;

use adk_core::api::Api;
use adk_core::Result;

/// 이름으로 컬럼을 읽는 최소 능력
///
/// 모든 접근은 best-effort입니다. 없는 컬럼이나 NULL은 `None`으로
/// 돌려주고, 디코더가 zero value로 채웁니다.
pub trait RowRead {
    fn text(&self, column: &str) -> Option<String>;
    fn int32(&self, column: &str) -> Option<i32>;
    fn int64(&self, column: &str) -> Option<i64>;
}

/// projection row 하나를 [`Api`]로 복원
///
/// 스칼라와 배열 컬럼은 관대하게(없으면 zero value) 읽지만, map/auth
/// 컬럼에 비어있지 않은 JSON 텍스트가 있는데 파싱이 안 되면 데이터
/// 손상이므로 에러를 반환합니다.
pub fn decode_api<R: RowRead>(row: &R) -> Result<Api> {
    let mut api = Api {
        id: row.text("id").unwrap_or_default(),
        name: row.text("name").unwrap_or_default(),
        description: row.text("description").unwrap_or_default(),
        member_ids: split_list(row.text("member_ids")),
        method: row.text("method").unwrap_or_default(),
        url: row.text("url").unwrap_or_default(),
        body: row.text("body").unwrap_or_default(),
        timeout: row.int32("timeout").unwrap_or_default(),
        directories: split_list(row.text("directories")),
        create_time: row.int64("create_time").unwrap_or_default(),
        update_time: row.int64("update_time").unwrap_or_default(),
        ..Default::default()
    };

    api.headers = decode_map(row.text("headers"))?;
    api.path_params = decode_map(row.text("path_params"))?;
    api.url_params = decode_map(row.text("url_params"))?;
    api.auth = decode_auth(row.text("auth"))?;

    Ok(api)
}

/// `array_to_string` projection 결과를 리스트로 복원
///
/// NULL과 빈 문자열 모두 빈 리스트입니다.
fn split_list(value: Option<String>) -> Vec<String> {
    match value {
        Some(text) if !text.is_empty() => text.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn decode_map(value: Option<String>) -> Result<HashMap<String, String>> {
    match value {
        Some(text) if !text.is_empty() => Ok(serde_json::from_str(&text)?),
        _ => Ok(HashMap::new()),
    }
}

fn decode_auth(value: Option<String>) -> Result<Option<serde_json::Value>> {
    match value {
        Some(text) if !text.is_empty() => Ok(Some(serde_json::from_str(&text)?)),
        _ => Ok(None),
    }
}
