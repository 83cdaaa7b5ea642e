use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Requests the stub received: authorization header and JSON body
pub type SeenRequests = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// What the stub OpenAI server answers with
#[derive(Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    seen: SeenRequests,
}

async fn chat_completions(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.seen.lock().unwrap().push((auth, body));
    (state.reply.status, Json(state.reply.body.clone()))
}

/// Start a stub server and return its base URL plus the recorded requests
pub async fn start_stub(reply: StubReply) -> (String, SeenRequests) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), seen)
}
