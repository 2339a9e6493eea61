//! Image upload and retrieval routes.
//!
//! `POST /image` stores a multipart upload and answers with its new ID.
//! `/image/<id>` returns the stored bytes for any method.

use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart, Path, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Serialize;

use super::response::text_response;
use super::AppContext;
use crate::error::{Error, Result};

/// Create image-related routes.
///
/// The multipart body limit is applied to the upload route only.
pub fn image_routes(max_upload_bytes: usize) -> Router<AppContext> {
    Router::new()
        .route(
            "/image",
            any(upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // `/*id` never matches an empty segment
        .route("/image/", any(serve_empty_id))
        .route("/image/*id", any(serve_image))
}

/// Body of a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: String,
}

/// Store an uploaded image under a fresh ID.
///
/// The extension is checked from the advisory filename before the file
/// content is read, so rejected uploads are never buffered or written.
async fn upload_image(State(ctx): State<AppContext>, request: Request) -> Result<Response> {
    if request.method() != Method::POST {
        return Err(Error::MethodNotAllowed);
    }

    let mut multipart = Multipart::from_request(request, &ctx)
        .await
        .map_err(|e| Error::Multipart(e.body_text()))?;

    let field_name = ctx.config.storage.field_name.as_str();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Multipart(e.body_text()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let extension = ctx.storage.check_extension(&file_name)?.to_owned();

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Multipart(e.body_text()))?;

        let id = ctx.storage.store(&extension, &data).await?;

        return Ok(created_json(&UploadResponse { id: id.to_string() }));
    }

    Err(Error::MissingFile)
}

/// Serve the image stored under the trailing path segment.
async fn serve_image(State(ctx): State<AppContext>, Path(id): Path<String>) -> Result<Response> {
    lookup_image(&ctx, &id).await
}

async fn serve_empty_id(State(ctx): State<AppContext>) -> Result<Response> {
    lookup_image(&ctx, "").await
}

async fn lookup_image(ctx: &AppContext, id: &str) -> Result<Response> {
    let image = ctx.storage.locate(id).await?;
    let data = ctx.storage.load(&image).await?;

    tracing::debug!(
        id,
        file = %image.file_name,
        bytes = data.len(),
        "Serving image"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, image.content_type().clone())],
        data,
    )
        .into_response())
}

fn created_json(body: &UploadResponse) -> Response {
    match serde_json::to_vec(body) {
        Ok(json) => (
            StatusCode::CREATED,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            json,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode upload response: {}", e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
