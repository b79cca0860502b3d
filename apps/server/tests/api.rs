use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use valida_server::Server;

async fn send(server: &Server, request: Request<Body>) -> (StatusCode, Value) {
    let response = server.router().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    let body = serde_json::from_slice(&bytes).expect("JSON response body");
    (status, body)
}

fn server() -> Server {
    Server::builder().build().expect("default server should build")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn post(uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_owned()))
        .expect("request")
}

#[tokio::test]
async fn get_with_query_validates() {
    let (status, body) = send(&server(), get("/api/cpf?cpf=52998224725")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valido": true, "cpf": "529.982.247-25", "mensagem": "valid" }));
}

#[tokio::test]
async fn get_with_encoded_spaces_validates() {
    let (status, body) = send(&server(), get("/api/cpf?cpf=111%20444%20777%2035")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], "111.444.777-35");
}

#[tokio::test]
async fn post_json_body_validates() {
    let request = post("/api/cpf", "application/json", r#"{"Cpf":"52998224725"}"#);
    let (status, body) = send(&server(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valido"], true);
    assert_eq!(body["cpf"], "529.982.247-25");
}

#[tokio::test]
async fn post_plain_text_body_validates() {
    let request = post("/api/cpf", "text/plain", "111.444.777-35\n");
    let (status, body) = send(&server(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], "111.444.777-35");
}

#[tokio::test]
async fn malformed_json_falls_back_to_text() {
    let request = post("/api/cpf", "application/json", "{not json");
    let (status, body) = send(&server(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "valido": false,
            "cpf": "{notjson",
            "mensagem": "must contain exactly 11 digits, you supplied 0"
        })
    );
}

#[tokio::test]
async fn query_wins_over_body() {
    let request = post("/api/cpf?cpf=52998224725", "application/json", r#"{"Cpf":"00000000000"}"#);
    let (status, body) = send(&server(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], "529.982.247-25");
}

#[tokio::test]
async fn repeated_query_key_keeps_the_first_value() {
    let (status, body) = send(&server(), get("/api/cpf?cpf=52998224725&cpf=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valido": true, "cpf": "529.982.247-25", "mensagem": "valid" }));
}

#[tokio::test]
async fn query_key_casings_do_not_conflict() {
    let (status, body) = send(&server(), get("/api/cpf?Cpf=11144477735&cpf=52998224725")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], "111.444.777-35");

    let (status, body) = send(&server(), get("/api/cpf?CPF=123&Cpf=52998224725")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["mensagem"], "must contain exactly 11 digits, you supplied 3");
}

#[tokio::test]
async fn integral_float_json_field_validates() {
    let request = post("/api/cpf", "application/json", r#"{"Cpf": 52998224725.0}"#);
    let (status, body) = send(&server(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], "529.982.247-25");
}

#[tokio::test]
async fn missing_cpf_is_a_bad_request() {
    let (status, body) = send(&server(), get("/api/cpf")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "valido": false, "cpf": null, "mensagem": "no CPF supplied" }));
}

#[tokio::test]
async fn get_never_reads_the_body() {
    let request = Request::builder()
        .uri("/api/cpf")
        .body(Body::from("52998224725"))
        .expect("request");
    let (status, body) = send(&server(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["mensagem"], "no CPF supplied");
}

#[tokio::test]
async fn repeated_digits_are_invalid() {
    let (status, body) = send(&server(), get("/api/cpf?cpf=000.000.000-00")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valido"], false);
    assert_eq!(body["cpf"], "000.000.000-00");
    assert_eq!(body["mensagem"], "invalid — check the digits and resubmit");
}

#[tokio::test]
async fn oversized_body_is_an_internal_failure() {
    let server = Server::builder().max_body_bytes(8).build().expect("server should build");
    let request = post("/api/cpf", "text/plain", "529.982.247-25");
    let (status, body) = send(&server, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["valido"], false);
    assert_eq!(body["cpf"], Value::Null);
    let message = body["mensagem"].as_str().unwrap_or_default();
    assert!(message.starts_with("failed to process the request: "), "got {message}");
    assert!(message.contains("Failed to read request body"), "got {message}");
}

#[tokio::test]
async fn health_reports_up() {
    let (status, body) = send(&server(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn other_methods_are_not_routed() {
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/cpf?cpf=52998224725")
        .body(Body::empty())
        .expect("request");
    let response = server().router().oneshot(request).await.expect("router is infallible");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn zero_body_limit_is_refused() {
    assert!(Server::builder().max_body_bytes(0).build().is_err());
}
