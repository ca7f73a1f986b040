//! Request routing for the clipboard endpoint

use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures::TryStreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::{debug, error, info};

use crate::application::ports::ClipboardBridge;

/// The only path that touches the clipboard
pub const CLIPBOARD_PATH: &str = "/pb";

/// Body returned for every other path
pub const USAGE: &str = "PUT or GET to /pb\n";

/// Buffer between the paste program and the response body
const PIPE_CAPACITY: usize = 64 * 1024;

#[derive(Clone)]
struct AppState {
    bridge: Arc<dyn ClipboardBridge>,
}

/// Build the router: GET/PUT/POST on `/pb`, 405 for other methods there,
/// usage hint everywhere else.
pub fn router(bridge: Arc<dyn ClipboardBridge>) -> Router {
    let clipboard = get(read_clipboard)
        .put(write_clipboard)
        .post(write_clipboard)
        // axum answers HEAD with the GET handler unless told otherwise
        .head(reject_method)
        .fallback(reject_method);

    Router::new()
        .route(CLIPBOARD_PATH, clipboard)
        .fallback(usage)
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(log_request))
        .with_state(AppState { bridge })
}

async fn log_request(request: Request, next: Next) -> Response {
    info!(method = %request.method(), path = %request.uri().path(), "Request");
    next.run(request).await
}

async fn usage() -> &'static str {
    USAGE
}

async fn reject_method(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method not allowed: {}\n", method),
    )
        .into_response()
}

/// Stream the paste program's stdout into the response as it is produced.
///
/// Headers go out before the program finishes, so a failure can only be
/// logged; the client sees a truncated or empty body.
async fn read_clipboard(State(state): State<AppState>) -> Response {
    let (mut writer, reader) = tokio::io::duplex(PIPE_CAPACITY);

    tokio::spawn(async move {
        if let Err(e) = state.bridge.read(&mut writer).await {
            error!(error = %e, "Error reading clipboard");
        }
        let _ = writer.shutdown().await;
    });

    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Body::from_stream(ReaderStream::new(reader)),
    )
        .into_response()
}

/// Feed the request body to the copy program. Failures are logged and the
/// client still gets 200.
async fn write_clipboard(State(state): State<AppState>, body: Body) -> StatusCode {
    let stream = body.into_data_stream().map_err(io::Error::other);
    let mut reader = StreamReader::new(stream);

    if let Err(e) = state.bridge.write(&mut reader).await {
        error!(error = %e, "Error writing clipboard");
    }

    // The program may exit without reading everything
    match tokio::io::copy(&mut reader, &mut tokio::io::sink()).await {
        Ok(0) => {}
        Ok(n) => debug!(bytes = n, "Discarded unread request body"),
        Err(e) => debug!(error = %e, "Request body ended early"),
    }

    StatusCode::OK
}
