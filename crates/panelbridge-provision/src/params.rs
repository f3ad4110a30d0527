use serde::{Deserialize, Serialize};

/// Per-account parameters supplied by the billing platform for lifecycle
/// operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountParams {
    pub domain: String,
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Product-level options configured once per hosting product.
///
/// Defaults mirror the module's configuration screen: "Default" package,
/// "user" ACL, SSL/DKIM/open_basedir on, PHP 8.1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOptions {
    pub package_name: String,
    pub acl: String,
    pub ssl: bool,
    pub dkim: bool,
    pub open_basedir: bool,
    pub php_selection: String,
}

impl Default for ProductOptions {
    fn default() -> Self {
        Self {
            package_name: "Default".to_string(),
            acl: "user".to_string(),
            ssl: true,
            dkim: true,
            open_basedir: true,
            php_selection: "PHP 8.1".to_string(),
        }
    }
}

pub(crate) fn as_wire_flag(value: bool) -> u8 {
    if value {
        1
    } else {
        0
    }
}

/// Minimal shape check for owner email addresses: one `@`, non-empty local
/// part, and a dotted domain. The panel does its own authoritative check.
pub fn email_looks_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
