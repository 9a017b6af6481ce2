//! In-process mock hub for HTTP-level tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::Value;

/// One request as the hub saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Decoded query pairs, in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let raw = self.query.clone().unwrap_or_default();
        let url = reqwest::Url::parse(&format!("http://hub.invalid/?{}", raw)).unwrap();
        url.query_pairs().into_owned().collect()
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

struct HubState {
    routes: HashMap<(String, String), (u16, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockHub {
    url: String,
    state: Arc<HubState>,
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle(
    State(state): State<Arc<HubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(&headers, header::AUTHORIZATION),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body,
    });

    let key = (method.to_string(), uri.path().to_string());
    let (status, body) = state
        .routes
        .get(&key)
        .cloned()
        .unwrap_or((404, r#"{"code":404,"message":"The requested resource wasn't found."}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

impl MockHub {
    /// Serve fixed `(method, path) -> (status, body)` routes on a random port
    pub fn start(routes: &[(&str, &str, u16, &str)]) -> Self {
        let routes = routes
            .iter()
            .map(|(m, p, s, b)| ((m.to_string(), p.to_string()), (*s, b.to_string())))
            .collect();
        let state = Arc::new(HubState {
            routes,
            requests: Mutex::new(Vec::new()),
        });

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("hub received no request")
    }
}

#[allow(dead_code)]
pub fn json_body(request: &RecordedRequest) -> Value {
    serde_json::from_str(&request.body).unwrap()
}
