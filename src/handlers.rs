use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::Path,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, LOCATION},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    alias::random_alias,
    clock::Clock,
    database::UrlStore,
    error::URLError,
    models::{ShortenRequest, ShortenResponse, UrlRecord},
};

/// Everything a request needs, shared by all concurrent handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn UrlStore>,
    clock: Arc<dyn Clock>,
    expected_authorization: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn UrlStore>, clock: Arc<dyn Clock>, api_token: &str) -> Self {
        Self {
            store,
            clock,
            expected_authorization: format!("Bearer {api_token}").into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_url_route).get(redirect_shorten_route))
        .route("/{short_url}", get(redirect_route))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

fn authorize(headers: &HeaderMap, expected: &str) -> Result<(), URLError> {
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim);

    if presented == Some(expected) {
        Ok(())
    } else {
        tracing::warn!("unauthorized request: invalid or missing token");
        Err(URLError::Unauthorized)
    }
}

/// Converts a lifetime in minutes into an absolute Unix deadline.
fn expires_at(now: i64, minutes: i64) -> Option<i64> {
    minutes
        .checked_mul(60)
        .and_then(|seconds| now.checked_add(seconds))
}

#[tracing::instrument(skip_all)]
async fn shorten_url_route(
    state: Extension<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ShortenResponse>, URLError> {
    authorize(&headers, &state.expected_authorization)?;

    // Decoded regardless of Content-Type.
    let request = serde_json::from_slice::<ShortenRequest>(&body).map_err(|err| {
        tracing::warn!(%err, "invalid request body");
        URLError::MalformedRequest
    })?;
    if request.long_url.is_empty() {
        tracing::warn!("invalid request body: empty long_url");
        return Err(URLError::MalformedRequest);
    }

    let short_url = request
        .short_url
        .filter(|short_url| !short_url.is_empty())
        .unwrap_or_else(random_alias);

    let exp = match request.exp {
        Some(minutes) => Some(expires_at(state.clock.now(), minutes).ok_or_else(|| {
            tracing::warn!(minutes, "invalid request body: exp out of range");
            URLError::MalformedRequest
        })?),
        None => None,
    };

    let record = UrlRecord::new(request.long_url, short_url, exp);
    state
        .store
        .upsert(&record)
        .await
        .map_err(URLError::Persist)?;
    tracing::info!(short_url = %record.short_url, exp = ?record.exp, "saved alias");

    Ok(Json(record.into()))
}

#[tracing::instrument(skip_all, fields(%short_url))]
async fn redirect_route(
    state: Extension<AppState>,
    Path(short_url): Path<String>,
) -> Result<Response, URLError> {
    resolve_alias(&state, &short_url).await
}

/// `/shorten` is also a valid alias; GET on it resolves like any other.
#[tracing::instrument(skip_all, fields(short_url = "shorten"))]
async fn redirect_shorten_route(state: Extension<AppState>) -> Result<Response, URLError> {
    resolve_alias(&state, "shorten").await
}

async fn resolve_alias(state: &AppState, short_url: &str) -> Result<Response, URLError> {
    let Some(record) = state
        .store
        .find_by_alias(short_url)
        .await
        .map_err(URLError::Lookup)?
    else {
        tracing::info!("alias not found");
        return Err(URLError::IncorrectPath);
    };

    if record.is_expired(state.clock.now()) {
        tracing::info!(exp = ?record.exp, "alias has expired");
        return Err(URLError::Expired);
    }

    let location = HeaderValue::try_from(record.long_url).map_err(URLError::InvalidTarget)?;
    tracing::debug!(id = ?record.id, "redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response())
}
