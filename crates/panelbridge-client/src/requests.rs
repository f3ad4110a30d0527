//! Typed request payloads for each panel operation
//!
//! Field names are wire-exact; the panel API is case sensitive about them.
//! Every payload carries the admin credentials, which is how the panel
//! authenticates API calls.

use crate::connection::PanelConnection;
use crate::endpoint::Endpoint;
use crate::response::{
    ChangePackageResponse, ChangePasswordResponse, CreateWebsiteResponse, DeleteWebsiteResponse,
    PanelResponse, VerifyConnResponse, WebsiteStatusResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A request payload bound to its endpoint and expected response shape.
pub trait ApiRequest: Serialize {
    const ENDPOINT: Endpoint;
    type Response: PanelResponse + DeserializeOwned;
}

/// Payload for `createWebsite`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebsiteRequest {
    #[serde(rename = "adminUser")]
    pub admin_user: String,
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    #[serde(rename = "domainName")]
    pub domain_name: String,
    #[serde(rename = "ownerEmail")]
    pub owner_email: String,
    #[serde(rename = "packageName")]
    pub package_name: String,
    #[serde(rename = "websiteOwner")]
    pub website_owner: String,
    #[serde(rename = "ownerPassword")]
    pub owner_password: String,
    pub acl: String,
    /// 0/1 flags, as the panel expects.
    pub ssl: u8,
    #[serde(rename = "dkimCheck")]
    pub dkim_check: u8,
    #[serde(rename = "openBasedir")]
    pub open_basedir: u8,
    #[serde(rename = "phpSelection")]
    pub php_selection: String,
}

impl ApiRequest for CreateWebsiteRequest {
    const ENDPOINT: Endpoint = Endpoint::CreateWebsite;
    type Response = CreateWebsiteResponse;
}

/// Target state for `submitWebsiteStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WebsiteState {
    Suspend,
    Unsuspend,
}

/// Payload for `submitWebsiteStatus`.
#[derive(Debug, Clone, Serialize)]
pub struct WebsiteStateRequest {
    #[serde(rename = "adminUser")]
    pub admin_user: String,
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    #[serde(rename = "websiteName")]
    pub website_name: String,
    pub state: WebsiteState,
}

impl ApiRequest for WebsiteStateRequest {
    const ENDPOINT: Endpoint = Endpoint::SubmitWebsiteStatus;
    type Response = WebsiteStatusResponse;
}

/// Payload for `verifyConn` (credentials only).
#[derive(Debug, Clone, Serialize)]
pub struct VerifyConnRequest {
    #[serde(rename = "adminUser")]
    pub admin_user: String,
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
}

impl VerifyConnRequest {
    pub fn from_connection(conn: &PanelConnection) -> Self {
        Self { admin_user: conn.admin_user.clone(), admin_pass: conn.admin_pass.clone() }
    }
}

impl ApiRequest for VerifyConnRequest {
    const ENDPOINT: Endpoint = Endpoint::VerifyConn;
    type Response = VerifyConnResponse;
}

/// Payload for `deleteWebsite`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteWebsiteRequest {
    #[serde(rename = "adminUser")]
    pub admin_user: String,
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    #[serde(rename = "domainName")]
    pub domain_name: String,
}

impl ApiRequest for DeleteWebsiteRequest {
    const ENDPOINT: Endpoint = Endpoint::DeleteWebsite;
    type Response = DeleteWebsiteResponse;
}

/// Payload for `changeUserPassAPI`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeUserPasswordRequest {
    #[serde(rename = "adminUser")]
    pub admin_user: String,
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    #[serde(rename = "websiteOwner")]
    pub website_owner: String,
    #[serde(rename = "ownerPassword")]
    pub owner_password: String,
}

impl ApiRequest for ChangeUserPasswordRequest {
    const ENDPOINT: Endpoint = Endpoint::ChangeUserPassApi;
    type Response = ChangePasswordResponse;
}

/// Payload for `changePackageAPI`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePackageRequest {
    #[serde(rename = "adminUser")]
    pub admin_user: String,
    #[serde(rename = "adminPass")]
    pub admin_pass: String,
    #[serde(rename = "websiteName")]
    pub website_name: String,
    #[serde(rename = "packageName")]
    pub package_name: String,
}

impl ApiRequest for ChangePackageRequest {
    const ENDPOINT: Endpoint = Endpoint::ChangePackageApi;
    type Response = ChangePackageResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_website_serializes_wire_fields() {
        let req = CreateWebsiteRequest {
            admin_user: "admin".into(),
            admin_pass: "secret".into(),
            domain_name: "example.com".into(),
            owner_email: "owner@example.com".into(),
            package_name: "Default".into(),
            website_owner: "owner".into(),
            owner_password: "hunter2".into(),
            acl: "user".into(),
            ssl: 1,
            dkim_check: 1,
            open_basedir: 0,
            php_selection: "PHP 8.1".into(),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "adminUser": "admin",
                "adminPass": "secret",
                "domainName": "example.com",
                "ownerEmail": "owner@example.com",
                "packageName": "Default",
                "websiteOwner": "owner",
                "ownerPassword": "hunter2",
                "acl": "user",
                "ssl": 1,
                "dkimCheck": 1,
                "openBasedir": 0,
                "phpSelection": "PHP 8.1",
            })
        );
    }

    #[test]
    fn website_state_uses_panel_spelling() {
        let req = WebsiteStateRequest {
            admin_user: "admin".into(),
            admin_pass: "secret".into(),
            website_name: "example.com".into(),
            state: WebsiteState::Suspend,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["state"], "Suspend");

        let req = WebsiteStateRequest { state: WebsiteState::Unsuspend, ..req };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["state"], "Unsuspend");
    }
}
