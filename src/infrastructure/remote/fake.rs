//! 进程内的 PostgREST 替身，供远程仓储测试使用
//!
//! 支持 `eq` 过滤、`or=(col.ilike."*q*",...)`、`order`、`limit`，
//! 单行查询（`Accept: application/vnd.pgrst.object+json`）无结果时返回 PGRST116

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::ACCEPT, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use super::client::{RemoteClient, RemoteClientConfig, NO_ROWS_CODE};

type Params = Vec<(String, String)>;

/// 让匹配的请求返回 500
#[derive(Debug, Clone)]
struct FailRule {
    method: Method,
    table: String,
    param: String,
}

#[derive(Default)]
struct FakeState {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<(Method, String, Params)>>,
    fail_rules: Mutex<Vec<FailRule>>,
    next_id: Mutex<u64>,
}

/// 运行中的替身服务
pub struct FakeRest {
    state: Arc<FakeState>,
    base_url: String,
}

impl FakeRest {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let router = Router::new()
            .route("/rest/v1/:table", any(handle))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn client(&self) -> Arc<RemoteClient> {
        Arc::new(RemoteClient::new(RemoteClientConfig::new(&self.base_url, "test-key")).unwrap())
    }

    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.state
            .tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// 带有 `param` 参数的 `method` 请求失败
    pub fn fail(&self, method: Method, table: &str, param: &str) {
        self.state.fail_rules.lock().unwrap().push(FailRule {
            method,
            table: table.to_string(),
            param: param.to_string(),
        });
    }

    /// 发往 `table` 的请求参数
    pub fn requests(&self, method: Method, table: &str) -> Vec<Params> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, t, _)| *m == method && t == table)
            .map(|(_, _, params)| params.clone())
            .collect()
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches_or(row: &Value, clause: &str) -> bool {
    clause
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .any(|part| match part.split_once(".ilike.") {
            Some((column, pattern)) => {
                let needle = pattern.trim_matches('"').trim_matches('*').to_lowercase();
                text(&row[column]).to_lowercase().contains(&needle)
            }
            None => false,
        })
}

fn matches(row: &Value, params: &Params) -> bool {
    params.iter().all(|(key, value)| match key.as_str() {
        "select" | "order" | "limit" => true,
        "or" => matches_or(row, value),
        column => match value.strip_prefix("eq.") {
            Some(expected) => text(&row[column]) == expected,
            None => true,
        },
    })
}

fn ordered(mut rows: Vec<Value>, params: &Params) -> Vec<Value> {
    for (key, value) in params {
        match key.as_str() {
            "order" => {
                let (column, direction) = value.split_once('.').unwrap_or((value.as_str(), "asc"));
                rows.sort_by(|a, b| match (&a[column], &b[column]) {
                    (Value::Number(x), Value::Number(y)) => {
                        x.as_f64().partial_cmp(&y.as_f64()).unwrap()
                    }
                    (x, y) => text(x).cmp(&text(y)),
                });
                if direction == "desc" {
                    rows.reverse();
                }
            }
            "limit" => rows.truncate(value.parse().unwrap()),
            _ => {}
        }
    }
    rows
}

fn no_rows() -> Response {
    (
        StatusCode::NOT_ACCEPTABLE,
        Json(json!({
            "code": NO_ROWS_CODE,
            "message": "JSON object requested, multiple (or no) rows returned",
            "details": "The result contains 0 rows",
            "hint": null
        })),
    )
        .into_response()
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    Path(table): Path<String>,
    Query(params): Query<Params>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push((method.clone(), table.clone(), params.clone()));

    let failing = state.fail_rules.lock().unwrap().iter().any(|rule| {
        rule.method == method && rule.table == table && params.iter().any(|(k, _)| *k == rule.param)
    });
    if failing {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": "XX000", "message": "storage offline" })),
        )
            .into_response();
    }

    let single = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("vnd.pgrst.object"));

    let mut tables = state.tables.lock().unwrap();
    let rows = tables.entry(table).or_default();

    match method {
        Method::GET => {
            let found = ordered(
                rows.iter().filter(|row| matches(row, &params)).cloned().collect(),
                &params,
            );
            if single {
                match found.as_slice() {
                    [row] => Json(row.clone()).into_response(),
                    _ => no_rows(),
                }
            } else {
                Json(found).into_response()
            }
        }
        Method::POST => {
            let mut row: Map<String, Value> = serde_json::from_slice(&body).unwrap();
            if !row.contains_key("id") {
                let mut next_id = state.next_id.lock().unwrap();
                *next_id += 1;
                row.insert("id".to_string(), json!(format!("srv-{}", next_id)));
            }
            let row = Value::Object(row);
            rows.push(row.clone());
            (StatusCode::CREATED, Json(row)).into_response()
        }
        Method::PATCH => {
            let patch: Map<String, Value> = serde_json::from_slice(&body).unwrap();
            let mut updated = Vec::new();
            for row in rows.iter_mut().filter(|row| matches(row, &params)) {
                if let Value::Object(fields) = row {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
            Json(updated).into_response()
        }
        Method::DELETE => {
            let (removed, kept): (Vec<Value>, Vec<Value>) =
                rows.drain(..).partition(|row| matches(row, &params));
            *rows = kept;
            Json(removed).into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
