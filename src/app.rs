use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::error::{LoadError, ProcessError};
use crate::filter::MinPrice;
use crate::loader;
use crate::record::Record;
use crate::session::Session;

/// Shared application state: the single session behind a mutex.
///
/// The mutex serializes the four session operations, so requests that the
/// runtime handles on different threads cannot interleave against the
/// working set.
pub struct AppState {
    session: Mutex<Session>,
    save_path: PathBuf,
}

#[derive(Deserialize)]
struct ProcessRequest {
    category: Option<String>,
    min_price: Option<MinPrice>,
    sort: Option<String>,
}

/// An error ready to leave the process: a status code per error kind plus
/// an `{"error": ...}` body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("request failed: {}", self.message);
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        let status = match err {
            LoadError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            LoadError::EmptyInput
            | LoadError::MissingField(_)
            | LoadError::TypeCoercion { .. }
            | LoadError::Encoding
            | LoadError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

/// Build the application router around the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/upload", post(upload))
        .route("/process", post(process))
        .route("/reset", get(reset))
        .route("/save", get(save))
        .with_state(state)
}

/// Start the server and block until it exits.
pub async fn run(addr: &str, save_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        session: Mutex::new(Session::new()),
        save_path,
    });

    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

/// Accept a multipart upload and replace the session with its records.
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Record>>, ApiError> {
    let mut payload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        // The form posts the file under "file"; any field carrying a
        // filename is accepted as a fallback.
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if is_file && payload.is_none() {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            payload = Some((file_name, bytes.to_vec()));
        }
    }

    let (file_name, bytes) =
        payload.ok_or_else(|| ApiError::bad_request("no file field in upload"))?;

    let records = loader::parse_records(&bytes, &file_name)?;
    log::info!("loaded {} records from {}", records.len(), file_name);

    let mut session = state.session.lock().unwrap();
    Ok(Json(session.upload(records).to_vec()))
}

/// Filter/sort the working set and return it with fresh statistics.
async fn process(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut session = state.session.lock().unwrap();
    let (rows, summary) = session.process(
        request.category.as_deref(),
        request.min_price.as_ref(),
        request.sort.as_deref(),
    )?;

    Ok(Json(json!({ "data": rows, "stats": summary })))
}

/// Restore the working set from the upload-time baseline.
async fn reset(State(state): State<Arc<AppState>>) -> Json<Vec<Record>> {
    let mut session = state.session.lock().unwrap();
    Json(session.reset().to_vec())
}

/// Dump the working set to the configured JSON file.
async fn save(State(state): State<Arc<AppState>>) -> Result<Html<&'static str>, ApiError> {
    let session = state.session.lock().unwrap();
    session
        .save(&state.save_path)
        .map_err(|e| ApiError::internal(format!("failed to write {}: {e}", state.save_path.display())))?;

    log::info!(
        "saved {} records to {}",
        session.working().len(),
        state.save_path.display()
    );
    Ok(Html(include_str!("./static/saved.html")))
}
