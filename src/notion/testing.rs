//! In-process fake of the Notion API for tests

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::config::NotionSettings;

/// A request received by the fake server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub notion_version: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct FakeState {
    requests: Mutex<Vec<RecordedRequest>>,
    queries: Mutex<VecDeque<(u16, Value)>>,
    children: Mutex<HashMap<String, VecDeque<(u16, Value)>>>,
}

/// Fake Notion server bound to an ephemeral local port.
///
/// Database queries are answered from a FIFO of canned responses; block
/// children are answered per block id. Unconfigured calls get an empty list.
pub struct FakeNotion {
    base_url: String,
    state: Arc<FakeState>,
}

impl FakeNotion {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Settings pointing at this server
    pub fn settings(&self) -> NotionSettings {
        NotionSettings {
            api_base_url: self.base_url.clone(),
            ..NotionSettings::default()
        }
    }

    pub fn push_query(&self, status: u16, body: Value) {
        self.state.queries.lock().unwrap().push_back((status, body));
    }

    pub fn push_children(&self, block_id: &str, status: u16, body: Value) {
        self.state
            .children
            .lock()
            .unwrap()
            .entry(block_id.to_string())
            .or_default()
            .push_back((status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn handle(State(state): State<Arc<FakeState>>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = parse_query(request.uri().query().unwrap_or(""));
    // Headers are copied out before the body await so the handler stays Send
    let (authorization, notion_version) = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        (header("authorization"), header("notion-version"))
    };

    let bytes = to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).ok();

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        query,
        authorization,
        notion_version,
        body,
    });

    let empty = (200, json!({"object": "list", "results": [], "has_more": false}));
    let (status, body) = if path.ends_with("/query") {
        state.queries.lock().unwrap().pop_front().unwrap_or(empty)
    } else if let Some(block_id) = path
        .strip_prefix("/blocks/")
        .and_then(|rest| rest.strip_suffix("/children"))
    {
        state
            .children
            .lock()
            .unwrap()
            .get_mut(block_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or(empty)
    } else {
        (404, json!({"object": "error", "code": "object_not_found"}))
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| {
                percent_encoding::percent_decode_str(s)
                    .decode_utf8_lossy()
                    .to_string()
            };
            (decode(key), decode(value))
        })
        .collect()
}

/// A database row with the blog's default property layout
pub fn page_json(id: &str, title: &str, slug: &str, date: Option<&str>) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [{"type": "text", "plain_text": title}]},
            "Slug": {"type": "rich_text", "rich_text": [{"type": "text", "plain_text": slug}]},
            "Summary": {"type": "rich_text", "rich_text": []},
            "Published": {"type": "checkbox", "checkbox": true},
            "Published Date": {"type": "date", "date": date.map(|d| json!({"start": d}))},
            "Category": {"type": "select", "select": {"name": "Tech"}},
            "Files": {"type": "files", "files": []}
        }
    })
}

/// One page of a paginated listing
pub fn list_json(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor,
    })
}

/// A text block such as a paragraph, heading or list item
pub fn block_json(id: &str, block_type: &str, text: &str, has_children: bool) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": block_type,
        "has_children": has_children,
        block_type: {"rich_text": [{"type": "text", "plain_text": text}]}
    })
}
