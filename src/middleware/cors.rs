use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Builds the CORS layer for the configured origin allow-list.
///
/// A `*` entry allows any origin. An origin that is not a valid header value
/// is a startup error.
pub fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        tracing::warn!("CORS allows any origin");
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", origin, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(origins = ?allowed_origins, "CORS allow-list configured");
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}
