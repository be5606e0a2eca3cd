use std::{
    collections::HashMap,
    net::{Ipv4Addr, SocketAddr, TcpListener},
};

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::{runtime::Runtime, sync::oneshot::Sender};

/// API key accepted by the test server.
pub const TEST_API_KEY: &str = "test-api-key";

pub struct ServerHandle {
    address: SocketAddr,
    shutdown_sender: Option<Sender<()>>,
}

impl ServerHandle {
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.address)
    }

    pub fn close(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Serves canned OpenWeather geocoding responses.
pub fn run_test_server() -> ServerHandle {
    let app = Router::new()
        .route("/geo/1.0/direct", get(direct))
        .route("/geo/1.0/zip", get(zip))
        .route("/echo/headers", get(echo_headers));

    let (sender, receiver) = tokio::sync::oneshot::channel::<()>();

    let address = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0);
    let listener = TcpListener::bind(address).unwrap();
    let address = listener.local_addr().unwrap();

    let runtime = Runtime::new().unwrap();

    std::thread::spawn(move || {
        runtime.block_on(async {
            let span = tracing::debug_span!("test_geocoding_server", %address);
            let _guard = span.enter();
            let server = axum::Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service());
            let server = server.with_graceful_shutdown(async {
                receiver.await.ok();
            });

            tracing::debug!("starting test geocoding server");
            server.await.unwrap();
            tracing::debug!("test geocoding server stopped");
        });
    });

    ServerHandle {
        address,
        shutdown_sender: Some(sender),
    }
}

/// Address on which nothing is listening.
pub fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)).unwrap();
    listener.local_addr().unwrap()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })),
    )
        .into_response()
}

fn is_authorized(params: &HashMap<String, String>) -> bool {
    params.get("appid").map(String::as_str) == Some(TEST_API_KEY)
}

async fn direct(Query(params): Query<HashMap<String, String>>) -> Response {
    if !is_authorized(&params) {
        return unauthorized();
    }

    match params.get("q").map(String::as_str) {
        Some("Richmond, VA, USA") => Json(json!([
            {
                "name": "Richmond",
                "local_names": {"en": "Richmond"},
                "lat": 37.5385087,
                "lon": -77.43428,
                "country": "US",
                "state": "Virginia"
            }
        ]))
        .into_response(),
        Some("Henrico, VA, USA") => Json(json!([
            {
                "name": "Henrico",
                "lat": 37.4957017,
                "lon": -77.3352574,
                "country": "US",
                "state": "Virginia"
            }
        ]))
        .into_response(),
        Some("Springfield, USA") => Json(json!([
            {"name": "Springfield", "lat": 39.7990175, "lon": -89.6439575, "country": "US", "state": "Illinois"},
            {"name": "Springfield", "lat": 37.2081729, "lon": -93.2922715, "country": "US", "state": "Missouri"}
        ]))
        .into_response(),
        Some("Garbled, USA") => (StatusCode::OK, "<html>garbled</html>").into_response(),
        Some("Overloaded, USA") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn zip(Query(params): Query<HashMap<String, String>>) -> Response {
    if !is_authorized(&params) {
        return unauthorized();
    }

    match params.get("zip").map(String::as_str) {
        Some("23228") => Json(json!({
            "zip": "23228",
            "name": "Henrico County",
            "lat": 37.4638,
            "lon": -77.398,
            "country": "US"
        }))
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "not found"})),
        )
            .into_response(),
    }
}

/// Replies with the request's header fields as a JSON object.
async fn echo_headers(headers: HeaderMap) -> Json<serde_json::Value> {
    let fields: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_string(), serde_json::Value::from(value))
        })
        .collect();

    Json(serde_json::Value::Object(fields))
}
