//! Router-level tests against an in-memory database

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use lava_server::api::build_app;
use lava_server::{Config, DbService, ServerState};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const BODY_LIMIT: usize = 32 * 1024 * 1024;

async fn app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(
        dir.path().to_string_lossy().to_string(),
        "sqlite::memory:",
        "http://lava.test",
    );
    let db = DbService::in_memory().await.unwrap();
    let state = ServerState::new(config, db).unwrap();
    (build_app(state), dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, http::HeaderMap, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    (status, headers, body.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, req).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn ada() -> Value {
    json!({
        "vcard_fname": "Ada",
        "vcard_lname": "Lovelace",
        "vcard_suffix": 2,
        "con_email": "ada@example.com",
        "con_phone": "+44 20 7946 0000",
        "wrk_org": "Analytical Engines",
        "wrk_title": "Engineer",
        "wrk_URL": "https://lava.example/ada",
        "wa_city": "London"
    })
}

// ── Health and catalogs ─────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "lava-server");

    let (status, body) = send_json(&app, get("/health/detailed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(&app, get("/api/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_suffix_list_is_seeded() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(&app, get("/api/suffixes")).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["sfx_name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 11);
    assert_eq!(names[0], "None");
    assert_eq!(names[1], "Jr.");
    assert_eq!(names[10], "X");
}

#[tokio::test]
async fn test_customization_catalog() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(&app, get("/api/customization")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backgrounds"].as_array().unwrap().len(), 8);
    assert_eq!(body["qr_patterns"].as_array().unwrap().len(), 4);

    let (_, body) = send_json(&app, get("/api/customization/default")).await;
    assert_eq!(body["background"]["id"], "lava");
    assert_eq!(body["qr_pattern"]["id"], "classic");
}

// ── Stored cards ────────────────────────────────────────────────────

#[tokio::test]
async fn test_store_and_read_back() {
    let (app, _dir) = app().await;
    let (status, created) = send_json(&app, post_json("/api/vcards", ada())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["vcard_id"].as_i64().unwrap();
    assert_eq!(created["vcard_fname"], "Ada");
    assert_eq!(created["wrk_URL"], "https://lava.example/ada");

    let (status, record) = send_json(&app, get(&format!("/api/vcards/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["vcard_lname"], "Lovelace");
    assert_eq!(record["vcard_suffix"], 2);
    assert_eq!(record["wa_city"], "London");
    assert_eq!(record["wa_street"], Value::Null);
}

#[tokio::test]
async fn test_store_requires_names() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(
        &app,
        post_json("/api/vcards", json!({ "con_email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields = &body["details"]["fields"];
    assert_eq!(fields["vcard_fname"][0], "The vcard fname field is required.");
    assert!(fields["vcard_lname"].is_array());
    assert!(fields["con_email"].is_array());
}

#[tokio::test]
async fn test_store_rejects_unknown_suffix() {
    let (app, _dir) = app().await;
    let mut card = ada();
    card["vcard_suffix"] = json!(99);
    let (status, body) = send_json(&app, post_json("/api/vcards", card)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 1002);
    assert!(body["details"]["fields"]["vcard_suffix"].is_array());
}

#[tokio::test]
async fn test_missing_card_is_404() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(&app, get("/api/vcards/4242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);

    let (status, _, _) = send(&app, get("/api/vcards/4242/card.jpg")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stored_card_exports() {
    let (app, _dir) = app().await;
    let (_, created) = send_json(&app, post_json("/api/vcards", ada())).await;
    let id = created["vcard_id"].as_i64().unwrap();

    let (status, headers, body) = send(
        &app,
        get(&format!("/api/vcards/{id}/card.jpg?mode=inline&background=ocean")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    let img = image::load_from_memory(&body).unwrap();
    assert_eq!((img.width(), img.height()), (420, 240));

    let (status, headers, body) = send(&app, get(&format!("/api/vcards/{id}/vcf"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/vcard; charset=utf-8");
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
    assert!(text.contains("N:Lovelace;Ada;;;Jr.\r\n"));
    assert!(text.contains("FN:Ada Lovelace Jr.\r\n"));
}

#[tokio::test]
async fn test_stored_card_rejects_unknown_options() {
    let (app, _dir) = app().await;
    let (_, created) = send_json(&app, post_json("/api/vcards", ada())).await;
    let id = created["vcard_id"].as_i64().unwrap();

    let (status, body) =
        send_json(&app, get(&format!("/api/vcards/{id}/card.jpg?mode=poster"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1005);

    let (status, _) =
        send_json(&app, get(&format!("/api/vcards/{id}/card.jpg?qr_pattern=dots"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Unsaved previews ────────────────────────────────────────────────

#[tokio::test]
async fn test_preview_dimensions_per_mode() {
    let (app, _dir) = app().await;
    let request = json!({ "data": ada() });

    for (mode, size) in [
        ("inline", (420, 240)),
        ("modal", (840, 480)),
        ("download", (1050, 600)),
    ] {
        let (status, headers, body) = send(
            &app,
            post_json(&format!("/api/vcard/preview?mode={mode}"), request.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "mode {mode}");
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        let img = image::load_from_memory(&body).unwrap();
        assert_eq!((img.width(), img.height()), size, "mode {mode}");
    }
}

#[tokio::test]
async fn test_preview_mode_from_body() {
    let (app, _dir) = app().await;
    let (status, _, body) = send(
        &app,
        post_json("/api/vcard/preview", json!({ "mode": "modal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let img = image::load_from_memory(&body).unwrap();
    assert_eq!(img.width(), 840);
}

#[tokio::test]
async fn test_preview_unknown_mode() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(
        &app,
        post_json("/api/vcard/preview?mode=poster", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1005);
}

#[tokio::test]
async fn test_preview_rejects_oversized_qr_margin() {
    let (app, _dir) = app().await;
    let request = json!({
        "data": ada(),
        "customization": {
            "qr_pattern": {
                "id": "custom",
                "name": "Custom",
                "errorCorrectionLevel": "M",
                "margin": 2000
            }
        }
    });
    let (status, _, _) = send(&app, post_json("/api/vcard/preview", request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_download_attachment() {
    let (app, _dir) = app().await;
    let (status, headers, body) = send(
        &app,
        post_json("/api/vcard/download", json!({ "data": ada(), "mode": "inline" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("filename=\"Ada Lovelace_card.jpg\""));

    let img = image::load_from_memory(&body).unwrap();
    assert_eq!((img.width(), img.height()), (1050, 600));
}

#[tokio::test]
async fn test_download_nameless_card() {
    let (app, _dir) = app().await;
    let (_, headers, _) = send(&app, post_json("/api/vcard/download", json!({}))).await;
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("filename=\"contact_card.jpg\""));
}

#[tokio::test]
async fn test_vcf_from_form_data() {
    let (app, _dir) = app().await;
    let (status, headers, body) = send(&app, post_json("/api/vcard/vcf", ada())).await;
    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("filename=\"Ada Lovelace.vcf\""));
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("ORG:Analytical Engines\r\n"));
    assert!(text.ends_with("END:VCARD\r\n"));
}

// ── Uploads ─────────────────────────────────────────────────────────

fn multipart(filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "lava-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/image/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 40, 10, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn test_upload_and_serve() {
    let (app, dir) = app().await;
    let (status, body) = send_json(&app, multipart("photo.png", &png_bytes())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original_name"], "photo.png");
    assert_eq!(body["format"], "jpg");

    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/api/image/"));
    let filename = body["filename"].as_str().unwrap();
    assert!(dir.path().join("images").join(filename).exists());

    let (status, headers, bytes) = send(&app, get(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );

    // Same content, same file
    let (_, again) = send_json(&app, multipart("copy.png", &png_bytes())).await;
    assert_eq!(again["url"], url.as_str());
}

#[tokio::test]
async fn test_upload_rejections() {
    let (app, _dir) = app().await;

    let (status, body) = send_json(&app, multipart("photo.gif", &png_bytes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2002);

    let (status, body) = send_json(&app, multipart("photo.png", b"")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2005);

    let (status, _) = send_json(&app, get("/api/image/missing.jpg")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_uploaded_image_renders_on_card() {
    let (app, _dir) = app().await;
    let (_, upload) = send_json(&app, multipart("logo.png", &png_bytes())).await;

    let mut card = ada();
    card["img_logo"] = upload["url"].clone();
    let (status, _, body) = send(
        &app,
        post_json("/api/vcard/preview?mode=inline", json!({ "data": card })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(image::load_from_memory(&body).is_ok());
}

// ── Shortener ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_shorten_redirect_and_stats() {
    let (app, _dir) = app().await;
    let (status, record) = send_json(
        &app,
        post_json("/api/shorten", json!({ "url": "https://example.com/some/long/path" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let code = record["short_code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(record["short_url"], format!("http://lava.test/s/{code}"));
    assert_eq!(record["clicks"], 0);

    let (status, headers, _) = send(&app, get(&format!("/s/{code}"))).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        headers[header::LOCATION],
        "https://example.com/some/long/path"
    );

    let (status, stats) = send_json(&app, get(&format!("/api/shorten/{code}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["clicks"], 1);

    // Stats do not count as clicks
    let (_, stats) = send_json(&app, get(&format!("/api/shorten/{code}"))).await;
    assert_eq!(stats["clicks"], 1);
}

#[tokio::test]
async fn test_unknown_short_code() {
    let (app, _dir) = app().await;
    let (status, body) = send_json(&app, get("/s/nope42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Short URL not found");

    let (status, _) = send_json(&app, get("/api/shorten/nope42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shorten_validation() {
    let (app, _dir) = app().await;

    let (status, body) =
        send_json(&app, post_json("/api/shorten", json!({ "url": "not a url" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 3002);

    let (status, body) = send_json(&app, post_json("/api/shorten", json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["fields"]["url"][0], "The url field is required.");

    let long = format!("https://example.com/{}", "a".repeat(2048));
    let (status, _) = send_json(&app, post_json("/api/shorten", json!({ "url": long }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
