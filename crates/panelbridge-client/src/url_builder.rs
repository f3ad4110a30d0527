//! URL construction for the panel API

use crate::connection::PanelConnection;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, ClientResult};
use url::Url;

/// Build the target URL for an API operation:
/// `{scheme}://{host}:{port}/api/{endpoint}`.
pub fn api_url(conn: &PanelConnection, endpoint: Endpoint) -> ClientResult<String> {
    build(conn, endpoint.as_str())
}

/// The panel's single-sign-on form target. Callers render their own login
/// form posting `username`/`password` to this URL; the client never calls it.
pub fn login_url(conn: &PanelConnection) -> ClientResult<String> {
    build(conn, "loginAPI")
}

fn build(conn: &PanelConnection, segment: &str) -> ClientResult<String> {
    let raw = format!("{}://{}:{}/api/{}", conn.scheme(), conn.host, conn.port, segment);
    let parsed = Url::parse(&raw).map_err(|e| ClientError::InvalidConfig {
        message: format!("invalid panel URL '{}': {}", raw, e),
    })?;

    // Url::parse normalizes some host typos into something surprising
    // (e.g. embedded whitespace); insist the round trip is faithful.
    // Domain hosts come back lowercased, so compare case-insensitively.
    if parsed.host_str().map(str::to_ascii_lowercase) != Some(conn.host.to_ascii_lowercase()) {
        return Err(ClientError::InvalidConfig {
            message: format!("invalid panel host '{}'", conn.host),
        });
    }

    // Return the formatted string rather than the parsed one so default
    // ports (80/443) stay explicit in the URL.
    Ok(raw)
}
