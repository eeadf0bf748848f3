use crate::error::{Error, Result};
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use url::Url;

/// CORS restricted to `origins`, with credentials allowed.
///
/// Methods and headers mirror the preflight request, since wildcards
/// cannot be combined with credentials.
pub fn allow_list_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| parse_origin(origin))
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

fn parse_origin(origin: &str) -> Result<HeaderValue> {
    let url = Url::parse(origin)
        .map_err(|e| Error::Config(format!("Invalid CORS origin {}: {}", origin, e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::Config(format!("Invalid CORS origin {}", origin)));
    }
    let serialized = url.origin().ascii_serialization();
    HeaderValue::from_str(&serialized)
        .map_err(|e| Error::Config(format!("Invalid CORS origin {}: {}", origin, e)))
}
