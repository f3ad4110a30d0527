//! Account lifecycle operations against a CyberPanel server.
//!
//! This is the layer a billing platform drives: it validates parameters,
//! performs one typed API call per lifecycle event, records an audit event,
//! and maps the panel's success flags into either the literal success token
//! or a human-readable error string.

pub mod audit;
pub mod error;
pub mod params;
pub mod provisioner;

pub use audit::{AuditEvent, AuditSink, NoopSink, TracingSink};
pub use error::{lifecycle_result, ProvisionError, ProvisionResult, SUCCESS_TOKEN, UNKNOWN_ERROR};
pub use params::{email_looks_valid, AccountParams, ProductOptions};
pub use provisioner::{ConnectionTest, Provisioner};
