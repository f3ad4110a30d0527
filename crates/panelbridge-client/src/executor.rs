//! The API call loop: one POST per invocation, bounded retry on transport
//! failure, strict status and parse handling.

use crate::client_cache::ClientCache;
use crate::connection::PanelConnection;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, ClientResult};
use crate::requests::ApiRequest;
use crate::url_builder;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Stateless client for the panel API. Each call is independent; the only
/// thing shared between calls is the pool of configured reqwest clients.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    clients: ClientCache,
}

impl ApiClient {
    pub fn new() -> Self {
        Self { clients: ClientCache::new() }
    }

    /// Perform one API operation and return the parsed JSON body verbatim.
    ///
    /// Transport failures (refused connection, DNS, timeout, errors before or
    /// while the response is read) are retried per the connection's
    /// `RetryPolicy` with a fixed delay. A non-200 status or an unparsable
    /// body terminates the call immediately.
    pub async fn call(
        &self,
        conn: &PanelConnection,
        endpoint: Endpoint,
        payload: &Value,
    ) -> ClientResult<Value> {
        let url = url_builder::api_url(conn, endpoint)?;
        let client = self.clients.get_client(conn)?;
        let total = Duration::from_millis(conn.timeout_config().total_ms);
        let retry = conn.retry_policy();

        let mut attempt: u32 = 0;
        let (status, body) = loop {
            attempt += 1;
            debug!(%endpoint, %url, attempt, "calling panel API");

            match self.attempt(&client, &url, payload, total).await {
                Ok(exchange) => break exchange,
                Err(err) if err.is_transport() && retry.should_retry(attempt) => {
                    warn!(%endpoint, attempt, error = %err, "transport failure, retrying");
                    tokio::time::sleep(Duration::from_millis(retry.delay_ms)).await;
                }
                Err(err) => return Err(err),
            }
        };

        // Redirects are disabled on the client, so a 3xx lands here like any
        // other unexpected status.
        if status != 200 {
            return Err(ClientError::HttpStatus { code: status });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Parse { message: e.to_string() })
    }

    /// Serialize a typed request, call its endpoint, and deserialize the
    /// typed response.
    pub async fn execute<R: ApiRequest>(
        &self,
        conn: &PanelConnection,
        request: &R,
    ) -> ClientResult<R::Response> {
        let payload = serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidConfig { message: format!("unserializable payload: {}", e) })?;
        let raw = self.call(conn, R::ENDPOINT, &payload).await?;
        serde_json::from_value(raw).map_err(|e| ClientError::Parse { message: e.to_string() })
    }

    /// One request/response exchange. Errors returned here are all
    /// transport-level and therefore candidates for retry; the status code is
    /// reported back untouched.
    async fn attempt(
        &self,
        client: &reqwest::Client,
        url: &str,
        payload: &Value,
        total: Duration,
    ) -> ClientResult<(u16, String)> {
        let exchange = async {
            let response = client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .header(reqwest::header::ACCEPT, "application/json")
                .json(payload)
                .send()
                .await
                .map_err(classify_transport)?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(classify_transport)?;
            Ok::<_, ClientError>((status, body))
        };

        match timeout(total, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Transport {
                message: format!("request timed out after {}ms", total.as_millis()),
            }),
        }
    }
}

fn classify_transport(err: reqwest::Error) -> ClientError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };
    ClientError::Transport { message }
}
