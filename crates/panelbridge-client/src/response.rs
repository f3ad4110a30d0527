//! Typed response shapes for each panel operation
//!
//! The panel answers with open-ended JSON objects; each operation has one
//! success-flag field and an optional `error_message`. The structs here read
//! only those two, tolerate everything else, and surface a missing flag as an
//! unrecognized shape instead of failing deserialization.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A truthy success flag. The panel is inconsistent about flag types and may
/// send `true`, `1`, `"1"` or `"true"`; PHP-style truthiness is the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Flag(truthy(&value)))
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !matches!(s.as_str(), "" | "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

/// Interpretation of a parsed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    /// The success flag was present and truthy.
    Accepted,
    /// The success flag was present and falsy; `message` is the server's
    /// `error_message` when it sent one.
    Rejected { message: Option<String> },
    /// The expected success flag was absent entirely.
    UnrecognizedShape,
}

/// Shared view over per-operation responses.
pub trait PanelResponse {
    /// Name of this operation's success-flag field.
    fn flag_field() -> &'static str;

    fn flag(&self) -> Option<Flag>;
    fn error_message(&self) -> Option<&str>;

    fn outcome(&self) -> ApiOutcome {
        match self.flag() {
            Some(Flag(true)) => ApiOutcome::Accepted,
            Some(Flag(false)) => {
                ApiOutcome::Rejected { message: self.error_message().map(str::to_owned) }
            }
            None => ApiOutcome::UnrecognizedShape,
        }
    }
}

macro_rules! panel_response {
    ($(#[$meta:meta])* $name:ident, $flag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Deserialize)]
        pub struct $name {
            #[serde(rename = $flag, default)]
            pub status: Option<Flag>,
            #[serde(default)]
            pub error_message: Option<String>,
        }

        impl PanelResponse for $name {
            fn flag_field() -> &'static str {
                $flag
            }

            fn flag(&self) -> Option<Flag> {
                self.status
            }

            fn error_message(&self) -> Option<&str> {
                self.error_message.as_deref()
            }
        }
    };
}

panel_response!(
    /// Response to `createWebsite`.
    CreateWebsiteResponse,
    "createWebSiteStatus"
);
panel_response!(
    /// Response to `submitWebsiteStatus`.
    WebsiteStatusResponse,
    "websiteStatus"
);
panel_response!(
    /// Response to `verifyConn`.
    VerifyConnResponse,
    "verifyConn"
);
panel_response!(
    /// Response to `deleteWebsite`.
    DeleteWebsiteResponse,
    "websiteDeleteStatus"
);
panel_response!(
    /// Response to `changeUserPassAPI`.
    ChangePasswordResponse,
    "changeStatus"
);
panel_response!(
    /// Response to `changePackageAPI`.
    ChangePackageResponse,
    "changePackage"
);
