//! Integration tests for the HTTP endpoints of migboard-server.
//!
//! Requests are driven through the router with `tower::ServiceExt::oneshot`;
//! video tests swap in recording backends so no ffmpeg is needed.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use migboard_common::test_utils::record_fixtures::small_csv;
use migboard_common::test_utils::{create_temp_dir, init_test_logging};
use migboard_common::Result;
use migboard_config::Config;
use migboard_data::{generate, read_table, MigrationTable};
use migboard_graphs::{FrameRenderer, FrameSequence, VideoEncoder, VideoFrame};
use migboard_server::*;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "migboard-test-boundary";

struct StubRenderer;

impl FrameRenderer for StubRenderer {
    fn render_frame(&self, frame: &VideoFrame, path: &Path) -> Result<()> {
        std::fs::write(path, frame.label.as_str())?;
        Ok(())
    }
}

#[derive(Default)]
struct CountingEncoder {
    frames: AtomicUsize,
}

impl VideoEncoder for CountingEncoder {
    fn encode(&self, frames: &FrameSequence, _fps: u32, output: &Path) -> Result<()> {
        self.frames.store(frames.len(), Ordering::SeqCst);
        std::fs::write(output, b"fake mp4 payload")?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn default_state() -> AppState {
    let config = Config::default();
    let table = generate(&config.generator).unwrap();
    AppState::new(config, table)
}

fn video_state(dir: &Path, table: MigrationTable) -> (AppState, Arc<CountingEncoder>) {
    let mut config = Config::default();
    config.video.output_dir = Some(dir.to_path_buf());
    let encoder = Arc::new(CountingEncoder::default());
    let video = VideoService::with_backends(&config, Arc::new(StubRenderer), encoder.clone());
    (AppState::with_video(config, table, video), encoder)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

fn multipart_request(field: &str, contents: &str) -> Request<Body> {
    multipart_file_request(field, "data.csv", contents)
}

fn multipart_file_request(field: &str, file_name: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_index_serves_dashboard() {
    init_test_logging();
    let app = create_router(default_state());
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("Workspace Migration Dashboard"));
}

#[tokio::test]
async fn test_options_list_functions_and_months() {
    let app = create_router(default_state());
    let (status, body) = get(&app, "/options").await;
    assert_eq!(status, StatusCode::OK);

    let options: OptionsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(options.business_functions.len(), 9);
    assert_eq!(options.business_functions[0], "Analytics");
    assert_eq!(options.months.len(), 19);
    assert_eq!(options.months[0].as_str(), "2024-06");
}

#[tokio::test]
async fn test_chart_data_for_all_rows() {
    let app = create_router(default_state());
    let (status, body) = get(&app, "/data?business_function=__all&month=__all").await;
    assert_eq!(status, StatusCode::OK);

    let value = json(&body);
    let figure = &value["plotly_fig"];
    assert_eq!(figure["frames"].as_array().unwrap().len(), 19);
    assert_eq!(figure["frames"][0]["name"], "2024-06");
    assert_eq!(figure["data"].as_array().unwrap().len(), 9);
    assert_eq!(figure["layout"]["xaxis"]["range"][0], 0.0);
}

#[tokio::test]
async fn test_chart_data_filtered_to_one_row() {
    let app = create_router(default_state());
    let (status, body) = get(&app, "/data?business_function=Finance&month=2024-06").await;
    assert_eq!(status, StatusCode::OK);

    let figure = &json(&body)["plotly_fig"];
    let frames = figure["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["data"].as_array().unwrap().len(), 1);
    assert_eq!(frames[0]["data"][0]["y"][0], "Finance");
}

#[tokio::test]
async fn test_chart_data_rejects_bad_month() {
    let app = create_router(default_state());
    let (status, body) = get(&app, "/data?month=June").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["status"], "error");
}

#[tokio::test]
async fn test_upload_replaces_table() {
    let app = create_router(default_state());
    let (status, body) = send(&app, multipart_request("file", small_csv())).await;
    assert_eq!(status, StatusCode::OK);

    let response: UploadResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.status, "ok");
    assert_eq!(response.rows, 6);

    let (_, body) = get(&app, "/options").await;
    let options: OptionsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(options.business_functions, vec!["Finance", "HR"]);

    let (_, body) = get(&app, "/health").await;
    assert_eq!(json(&body)["rows"], 6);
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let app = create_router(default_state());
    let (status, body) = send(&app, multipart_request("other", small_csv())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["status"], "error");

    let (_, body) = get(&app, "/health").await;
    assert_eq!(json(&body)["rows"], 171);
}

#[tokio::test]
async fn test_upload_with_no_file_chosen_is_400() {
    let app = create_router(default_state());
    let (status, body) = send(&app, multipart_file_request("file", "", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["message"], "missing upload field 'file'");

    let (status, _) = send(&app, multipart_file_request("file", "data.csv", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/health").await;
    assert_eq!(json(&body)["rows"], 171);
}

#[tokio::test]
async fn test_malformed_csv_is_server_error_and_keeps_table() {
    let app = create_router(default_state());
    let bad = "month,business_function,workspace_count,data_volume_tb\nsoon,HR,1,1.0\n";
    let (status, _) = send(&app, multipart_request("file", bad)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = get(&app, "/health").await;
    assert_eq!(json(&body)["rows"], 171);
}

#[tokio::test]
async fn test_download_round_trips_upload() {
    let app = create_router(default_state());
    send(&app, multipart_request("file", small_csv())).await;

    let response = app
        .clone()
        .oneshot(Request::get("/download_csv").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("migration_data.csv"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let downloaded = read_table(body.as_ref()).unwrap();
    let uploaded = read_table(small_csv().as_bytes()).unwrap();
    assert_eq!(downloaded, uploaded);
}

#[tokio::test]
async fn test_generate_and_fetch_video() {
    let dir = create_temp_dir();
    let table = generate(&Config::default().generator).unwrap();
    let (state, encoder) = video_state(dir.path(), table);
    let app = create_router(state);

    let (status, body) = send(
        &app,
        Request::post("/generate_video").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(encoder.frames.load(Ordering::SeqCst), 19);

    let link: VideoLink = serde_json::from_slice(&body).unwrap();
    assert!(link.url.starts_with("/video/migration_"));
    assert!(link.url.ends_with(".mp4"));

    let (status, body) = get(&app, &link.url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"fake mp4 payload");
}

#[tokio::test]
async fn test_generate_video_on_empty_table_is_reported() {
    let dir = create_temp_dir();
    let (state, encoder) = video_state(dir.path(), MigrationTable::default());
    let app = create_router(state);

    let (status, body) = send(
        &app,
        Request::post("/generate_video").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json(&body)["message"], "Table is empty");
    assert_eq!(encoder.frames.load(Ordering::SeqCst), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_fetch_unknown_or_invalid_video() {
    let dir = create_temp_dir();
    let (state, _) = video_state(dir.path(), MigrationTable::default());
    let app = create_router(state);

    let (status, _) = get(&app, "/video/migration_missing.mp4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/video/passwd").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
