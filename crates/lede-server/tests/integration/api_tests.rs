use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::integration::common::{ARTICLE_FIXTURE, EMPTY_FIXTURE, serve_fixture, test_router};

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_returns_200() {
    let response = test_router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "lede");
    assert!(json["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn index_describes_the_service() {
    let response = test_router()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["service"], "lede");
    assert!(json["endpoints"]["/scrape"].is_object());
    assert_eq!(json["strategies"][0], "json-ld");
}

#[tokio::test]
async fn missing_url_returns_400() {
    let response = test_router()
        .oneshot(Request::get("/scrape").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "invalid_url");
}

#[tokio::test]
async fn relative_url_returns_400() {
    let response = test_router()
        .oneshot(
            Request::get("/scrape?url=example.com/story")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_url");
}

#[tokio::test]
async fn non_http_scheme_returns_400() {
    let response = test_router()
        .oneshot(
            Request::get("/scrape?url=file:///etc/passwd")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_url");
}

#[tokio::test]
async fn scrape_returns_all_seven_contract_keys() {
    let article_url = serve_fixture(ARTICLE_FIXTURE).await;

    let before = Utc::now();
    let response = test_router()
        .oneshot(
            Request::get(format!("/scrape?url={article_url}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    for key in [
        "title",
        "authors",
        "text",
        "images",
        "top_image",
        "keywords",
        "timestamp",
    ] {
        assert!(json.get(key).is_some(), "missing contract key {key}");
    }

    assert_eq!(json["title"], "Senate Passes Budget");
    assert_eq!(json["authors"][0], "Jane Doe");
    assert!(json["text"].as_str().unwrap().contains("marathon"));
    assert_eq!(json["images"][0], "https://cdn.example.com/hero.jpg");
    assert_eq!(json["top_image"], "https://cdn.example.com/hero.jpg");
    assert_eq!(
        json["keywords"],
        serde_json::json!(["senate", "budget"])
    );
    assert_eq!(json["publish_date"], "2024-03-01T10:00:00Z");
    assert_eq!(json["method"], "selectors");
    assert_eq!(json["source"].as_str().unwrap(), article_url);

    // timestamp is the extraction time, not the article publish time
    let stamp = DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).unwrap();
    assert!(stamp >= before && stamp <= after);
}

#[tokio::test]
async fn post_scrape_accepts_a_json_body() {
    let article_url = serve_fixture(ARTICLE_FIXTURE).await;

    let body = serde_json::json!({ "url": article_url });
    let response = test_router()
        .oneshot(
            Request::post("/scrape")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Senate Passes Budget");
}

#[tokio::test]
async fn post_scrape_with_malformed_body_returns_json_400() {
    let response = test_router()
        .oneshot(
            Request::post("/scrape")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "invalid_url");
    assert!(json["message"].as_str().is_some());
}

#[tokio::test]
async fn post_scrape_without_content_type_returns_json_400() {
    let response = test_router()
        .oneshot(
            Request::post("/scrape")
                .body(Body::from(r#"{"url": "https://example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_url");
}

#[tokio::test]
async fn unextractable_page_returns_422() {
    let article_url = serve_fixture(EMPTY_FIXTURE).await;

    let response = test_router()
        .oneshot(
            Request::get(format!("/scrape?url={article_url}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "extraction_failed");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = test_router()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
