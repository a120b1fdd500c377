//! HTTP endpoints of the dashboard.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use migboard_common::{MigboardError, MonthLabel};
use migboard_data::{filter_rows, read_table, table_to_csv, Selection};
use migboard_graphs::{build_chart, ChartFigure};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Multipart field carrying the uploaded CSV.
pub const UPLOAD_FIELD: &str = "file";
/// Download name of the CSV snapshot.
pub const CSV_DOWNLOAD_NAME: &str = "migration_data.csv";
/// Download name of generated videos.
pub const VIDEO_DOWNLOAD_NAME: &str = "migration_animation.mp4";

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Filter choices offered by the dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    /// Distinct business functions, sorted.
    pub business_functions: Vec<String>,
    /// Distinct months, chronological.
    pub months: Vec<MonthLabel>,
}

/// Query parameters of the chart endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// Business function, or `__all`.
    pub business_function: Option<String>,
    /// `YYYY-MM` month, or `__all`.
    pub month: Option<String>,
}

/// Chart endpoint response.
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Figure description for the client-side charting library.
    pub plotly_fig: ChartFigure,
}

/// Upload endpoint response.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Rows in the new table.
    pub rows: usize,
}

/// Video generation response.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoLink {
    /// Relative URL to fetch the video from.
    pub url: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Rows in the current table.
    pub rows: usize,
    /// Seconds since the state was created.
    pub uptime_seconds: u64,
}

/// Create the dashboard router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/options", get(options))
        .route("/data", get(chart_data))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/download_csv", get(download_csv))
        .route("/generate_video", post(generate_video))
        .route("/video/:name", get(fetch_video))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Dashboard page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness and table size
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        rows: state.store.snapshot().len(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// Available business functions and months
async fn options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let table = state.store.snapshot();
    Json(OptionsResponse {
        business_functions: table.business_functions(),
        months: table.month_labels(),
    })
}

/// Animated chart description for the selected subset
async fn chart_data(
    Query(query): Query<ChartQuery>,
    State(state): State<AppState>,
) -> Result<Json<ChartResponse>, ApiError> {
    let business_function = Selection::from_query(query.business_function.as_deref());
    let month = Selection::<MonthLabel>::parse_query(query.month.as_deref())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let table = state.store.snapshot();
    let rows = filter_rows(&table, &business_function, &month);

    Ok(Json(ChartResponse {
        plotly_fig: build_chart(&rows, &state.config.chart),
    }))
}

/// Replace the table with an uploaded CSV
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // A form submitted without choosing a file still sends the part,
        // with an empty file name and no content.
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::MissingUpload(UPLOAD_FIELD)),
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ApiError::MissingUpload(UPLOAD_FIELD));
        }
        let table = read_table(bytes.as_ref())?;
        let rows = state.store.replace(table);

        info!(rows, file = %file_name, "Accepted CSV upload");
        return Ok(Json(UploadResponse {
            status: "ok".to_string(),
            rows,
        }));
    }

    Err(ApiError::MissingUpload(UPLOAD_FIELD))
}

/// CSV snapshot of the current table
async fn download_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = table_to_csv(&state.store.snapshot())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_DOWNLOAD_NAME}\""),
            ),
        ],
        body,
    ))
}

/// Render the animation of the current table
async fn generate_video(State(state): State<AppState>) -> Result<Json<VideoLink>, ApiError> {
    let table = state.store.snapshot();
    let video = Arc::clone(&state.video);

    let generated = tokio::task::spawn_blocking(move || video.generate(&table))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;

    Ok(Json(VideoLink {
        url: format!("/video/{}", generated.file_name),
    }))
}

/// Download a previously generated video
async fn fetch_video(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let path = state
        .video
        .resolve(&name)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid video name '{name}'")))?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound(format!("video '{name}'"))
        } else {
            ApiError::Domain(MigboardError::Io(e))
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "video/mp4".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{VIDEO_DOWNLOAD_NAME}\""),
            ),
        ],
        bytes,
    ))
}
