//! Audit logging for provisioning operations
//!
//! Every operation forwards (operation, request, response-or-error) to a
//! pluggable sink. Sinks are infallible by construction: nothing a sink does
//! may affect the provisioning operation that produced the event.

use serde_json::Value;
use tracing::{info, warn};

/// One recorded provisioning exchange. Credential fields in `request` are
/// masked before the event is built.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub operation: &'static str,
    pub request: Value,
    pub response: Option<Value>,
    pub error: Option<String>,
}

impl AuditEvent {
    pub fn response(operation: &'static str, request: Value, response: &Value) -> Self {
        Self { operation, request, response: Some(response.clone()), error: None }
    }

    pub fn failure(operation: &'static str, request: Value, error: &dyn std::fmt::Display) -> Self {
        Self { operation, request, response: None, error: Some(error.to_string()) }
    }
}

/// Destination for audit events.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Default sink: structured log lines via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, event: &AuditEvent) {
        // Bound outside the macro: tracing's field syntax pulls its own
        // `Value` trait into scope, which would shadow serde_json's.
        let response = event.response.as_ref().unwrap_or(&Value::Null);
        match &event.error {
            None => info!(
                operation = event.operation,
                request = %event.request,
                response = %response,
                "panel operation"
            ),
            Some(error) => warn!(
                operation = event.operation,
                request = %event.request,
                error = %error,
                "panel operation failed"
            ),
        }
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl AuditSink for NoopSink {
    fn record(&self, _event: &AuditEvent) {}
}

/// Mask credential values in a request payload before it is recorded.
pub fn redact_payload(payload: &Value) -> Value {
    const SECRET_FIELDS: [&str; 2] = ["adminPass", "ownerPassword"];

    let mut masked = payload.clone();
    if let Value::Object(map) = &mut masked {
        for field in SECRET_FIELDS {
            if let Some(entry) = map.get_mut(field) {
                *entry = Value::String("***".to_string());
            }
        }
    }
    masked
}
