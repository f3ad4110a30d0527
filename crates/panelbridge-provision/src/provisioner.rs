//! The lifecycle operations the billing platform drives
//!
//! Each operation validates its inputs, performs one API call, records an
//! audit event, and interprets the operation's success flag. Operations are
//! stateless: the connection parameters arrive on every call and nothing is
//! cached between calls beyond the underlying HTTP clients.

use crate::audit::{redact_payload, AuditEvent, AuditSink, TracingSink};
use crate::error::{ProvisionError, ProvisionResult};
use crate::params::{as_wire_flag, email_looks_valid, AccountParams, ProductOptions};
use panelbridge_client::{
    ApiClient, ApiOutcome, ApiRequest, ChangePackageRequest, ChangeUserPasswordRequest,
    ClientError, CreateWebsiteRequest, DeleteWebsiteRequest, PanelConnection, PanelResponse,
    VerifyConnRequest, WebsiteState, WebsiteStateRequest,
};
use std::sync::Arc;

/// Structured result of a connection test, as the billing platform expects
/// it: a flag plus an error description (empty on success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTest {
    pub success: bool,
    pub error: String,
}

impl ConnectionTest {
    fn ok() -> Self {
        Self { success: true, error: String::new() }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

/// Drives account lifecycle operations against one or more panel servers.
pub struct Provisioner {
    client: ApiClient,
    audit: Arc<dyn AuditSink>,
}

impl Default for Provisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl Provisioner {
    pub fn new() -> Self {
        Self { client: ApiClient::new(), audit: Arc::new(TracingSink) }
    }

    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Create a hosting account for `params.domain`.
    pub async fn create_account(
        &self,
        conn: &PanelConnection,
        params: &AccountParams,
        options: &ProductOptions,
    ) -> ProvisionResult<()> {
        require("domain", &params.domain)?;
        require("username", &params.username)?;
        require("password", &params.password)?;
        if !email_looks_valid(&params.email) {
            return Err(ProvisionError::InvalidEmail(params.email.clone()));
        }

        let request = CreateWebsiteRequest {
            admin_user: conn.admin_user.clone(),
            admin_pass: conn.admin_pass.clone(),
            domain_name: params.domain.clone(),
            owner_email: params.email.clone(),
            package_name: params_or_default(&options.package_name, "Default"),
            website_owner: params.username.clone(),
            owner_password: params.password.clone(),
            acl: params_or_default(&options.acl, "user"),
            ssl: as_wire_flag(options.ssl),
            dkim_check: as_wire_flag(options.dkim),
            open_basedir: as_wire_flag(options.open_basedir),
            php_selection: params_or_default(&options.php_selection, "PHP 8.1"),
        };
        self.run("create_account", conn, &request).await
    }

    /// Suspend the website named by `domain`.
    pub async fn suspend_account(&self, conn: &PanelConnection, domain: &str) -> ProvisionResult<()> {
        self.set_website_state("suspend_account", conn, domain, WebsiteState::Suspend).await
    }

    /// Lift a suspension on the website named by `domain`.
    pub async fn unsuspend_account(&self, conn: &PanelConnection, domain: &str) -> ProvisionResult<()> {
        self.set_website_state("unsuspend_account", conn, domain, WebsiteState::Unsuspend).await
    }

    async fn set_website_state(
        &self,
        operation: &'static str,
        conn: &PanelConnection,
        domain: &str,
        state: WebsiteState,
    ) -> ProvisionResult<()> {
        require("domain", domain)?;
        let request = WebsiteStateRequest {
            admin_user: conn.admin_user.clone(),
            admin_pass: conn.admin_pass.clone(),
            website_name: domain.to_string(),
            state,
        };
        self.run(operation, conn, &request).await
    }

    /// Delete the website and account for `domain`.
    pub async fn terminate_account(&self, conn: &PanelConnection, domain: &str) -> ProvisionResult<()> {
        require("domain", domain)?;
        let request = DeleteWebsiteRequest {
            admin_user: conn.admin_user.clone(),
            admin_pass: conn.admin_pass.clone(),
            domain_name: domain.to_string(),
        };
        self.run("terminate_account", conn, &request).await
    }

    /// Set a new password for the website owner.
    pub async fn change_password(
        &self,
        conn: &PanelConnection,
        username: &str,
        password: &str,
    ) -> ProvisionResult<()> {
        require("username", username)?;
        require("password", password)?;
        let request = ChangeUserPasswordRequest {
            admin_user: conn.admin_user.clone(),
            admin_pass: conn.admin_pass.clone(),
            website_owner: username.to_string(),
            owner_password: password.to_string(),
        };
        self.run("change_password", conn, &request).await
    }

    /// Move the website to a different hosting package.
    pub async fn change_package(
        &self,
        conn: &PanelConnection,
        domain: &str,
        package_name: &str,
    ) -> ProvisionResult<()> {
        require("domain", domain)?;
        require("package name", package_name)?;
        let request = ChangePackageRequest {
            admin_user: conn.admin_user.clone(),
            admin_pass: conn.admin_pass.clone(),
            website_name: domain.to_string(),
            package_name: package_name.to_string(),
        };
        self.run("change_package", conn, &request).await
    }

    /// Verify reachability and admin credentials. Never returns `Err`: every
    /// failure mode is folded into the structured result.
    pub async fn test_connection(&self, conn: &PanelConnection) -> ConnectionTest {
        if conn.admin_user.trim().is_empty() || conn.admin_pass.trim().is_empty() {
            return ConnectionTest::failed("Server username and password are required");
        }

        let request = VerifyConnRequest::from_connection(conn);
        match self.run("test_connection", conn, &request).await {
            Ok(()) => ConnectionTest::ok(),
            Err(ProvisionError::Rejected { message, .. }) => ConnectionTest::failed(
                message.unwrap_or_else(|| "Connection verification failed".to_string()),
            ),
            Err(ProvisionError::InvalidResponse { .. }) => {
                ConnectionTest::failed("Invalid response from panel API")
            }
            Err(e) => ConnectionTest::failed(format!("Connection test failed: {}", e)),
        }
    }

    /// One call: serialize, post, audit, interpret the success flag.
    async fn run<R: ApiRequest>(
        &self,
        operation: &'static str,
        conn: &PanelConnection,
        request: &R,
    ) -> ProvisionResult<()> {
        let payload = serde_json::to_value(request).map_err(|e| {
            ClientError::InvalidConfig { message: format!("unserializable payload: {}", e) }
        })?;
        let recorded = redact_payload(&payload);

        let raw = match self.client.call(conn, R::ENDPOINT, &payload).await {
            Ok(raw) => {
                self.audit.record(&AuditEvent::response(operation, recorded, &raw));
                raw
            }
            Err(e) => {
                self.audit.record(&AuditEvent::failure(operation, recorded, &e));
                return Err(e.into());
            }
        };

        let response: R::Response = serde_json::from_value(raw)
            .map_err(|e| ClientError::Parse { message: e.to_string() })?;

        match response.outcome() {
            ApiOutcome::Accepted => Ok(()),
            ApiOutcome::Rejected { message } => {
                Err(ProvisionError::Rejected { operation, message })
            }
            ApiOutcome::UnrecognizedShape => Err(ProvisionError::InvalidResponse { operation }),
        }
    }
}

fn require(name: &'static str, value: &str) -> ProvisionResult<()> {
    if value.trim().is_empty() {
        Err(ProvisionError::MissingParameter(name))
    } else {
        Ok(())
    }
}

fn params_or_default(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::lifecycle_result;
    use httpmock::prelude::*;
    use panelbridge_client::{RetryPolicy, TimeoutConfig};
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingSink {
        events: Mutex<Vec<AuditEvent>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self { events: Mutex::new(Vec::new()) })
        }

        fn events(&self) -> Vec<AuditEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl AuditSink for RecordingSink {
        fn record(&self, event: &AuditEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn mock_connection(server: &MockServer) -> PanelConnection {
        let mut conn = PanelConnection::new(server.host(), server.port(), "admin", "secret");
        conn.retry = Some(RetryPolicy { max_retries: 0, delay_ms: 0 });
        conn.timeout = Some(TimeoutConfig { connect_ms: 2_000, total_ms: 5_000 });
        conn
    }

    fn account() -> AccountParams {
        AccountParams {
            domain: "example.com".to_string(),
            username: "owner".to_string(),
            password: "hunter2".to_string(),
            email: "owner@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_account_success_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/createWebsite")
                    .json_body_partial(r#"{ "domainName": "example.com", "ssl": 1 }"#);
                then.status(200).json_body(json!({ "createWebSiteStatus": true }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let result = provisioner
            .create_account(&conn, &account(), &ProductOptions::default())
            .await;

        assert_eq!(lifecycle_result(&result), "success");
    }

    #[tokio::test]
    async fn create_account_validates_before_calling() {
        let provisioner = Provisioner::new();
        let conn = PanelConnection::new("panel.example.com", 8090, "admin", "secret");

        let mut params = account();
        params.domain.clear();
        let err = provisioner
            .create_account(&conn, &params, &ProductOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::MissingParameter("domain")));

        let mut params = account();
        params.email = "not-an-email".to_string();
        let err = provisioner
            .create_account(&conn, &params, &ProductOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn suspend_sends_suspend_state_and_maps_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/submitWebsiteStatus")
                    .json_body_partial(r#"{ "websiteName": "example.com", "state": "Suspend" }"#);
                then.status(200)
                    .json_body(json!({ "websiteStatus": false, "error_message": "website not found" }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let err = provisioner.suspend_account(&conn, "example.com").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "suspend_account failed: website not found"
        );
    }

    #[tokio::test]
    async fn rejection_without_message_gets_default() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/deleteWebsite");
                then.status(200).json_body(json!({ "websiteDeleteStatus": 0 }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let err = provisioner.terminate_account(&conn, "example.com").await.unwrap_err();

        assert_eq!(err.to_string(), "terminate_account failed: Unknown error occurred");
    }

    #[tokio::test]
    async fn missing_flag_is_invalid_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/changeUserPassAPI");
                then.status(200).json_body(json!({ "unexpected": "shape" }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let err = provisioner
            .change_password(&conn, "owner", "newpass")
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::InvalidResponse { operation: "change_password" }));
    }

    #[tokio::test]
    async fn change_package_accepts_truthy_flag() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/changePackageAPI")
                    .json_body_partial(r#"{ "websiteName": "example.com", "packageName": "Gold" }"#);
                then.status(200).json_body(json!({ "changePackage": 1 }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        provisioner.change_package(&conn, "example.com", "Gold").await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_maps_rejection_to_structured_result() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/verifyConn");
                then.status(200)
                    .json_body(json!({ "verifyConn": false, "error_message": "bad credentials" }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let result = provisioner.test_connection(&conn).await;

        assert_eq!(result, ConnectionTest { success: false, error: "bad credentials".to_string() });
    }

    #[tokio::test]
    async fn test_connection_rejection_without_message_names_verification() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/verifyConn");
                then.status(200).json_body(json!({ "verifyConn": false }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let result = provisioner.test_connection(&conn).await;

        assert_eq!(
            result,
            ConnectionTest { success: false, error: "Connection verification failed".to_string() }
        );
    }

    #[tokio::test]
    async fn test_connection_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/verifyConn");
                then.status(200).json_body(json!({ "verifyConn": true }));
            })
            .await;

        let provisioner = Provisioner::new();
        let conn = mock_connection(&server);
        let result = provisioner.test_connection(&conn).await;

        assert!(result.success);
        assert!(result.error.is_empty());
    }

    #[tokio::test]
    async fn test_connection_requires_credentials() {
        let provisioner = Provisioner::new();
        let conn = PanelConnection::new("panel.example.com", 8090, "admin", "");
        let result = provisioner.test_connection(&conn).await;

        assert!(!result.success);
        assert_eq!(result.error, "Server username and password are required");
    }

    #[tokio::test]
    async fn test_connection_folds_transport_errors() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut conn = PanelConnection::new("127.0.0.1", port, "admin", "secret");
        conn.retry = Some(RetryPolicy { max_retries: 0, delay_ms: 0 });
        conn.timeout = Some(TimeoutConfig { connect_ms: 500, total_ms: 1_000 });

        let provisioner = Provisioner::new();
        let result = provisioner.test_connection(&conn).await;

        assert!(!result.success);
        assert!(result.error.starts_with("Connection test failed:"), "{}", result.error);
    }

    #[tokio::test]
    async fn audit_events_mask_credentials_and_never_block_operations() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createWebsite");
                then.status(200).json_body(json!({ "createWebSiteStatus": true }));
            })
            .await;

        let sink = RecordingSink::new();
        let provisioner = Provisioner::new().with_sink(sink.clone());
        let conn = mock_connection(&server);
        provisioner
            .create_account(&conn, &account(), &ProductOptions::default())
            .await
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].operation, "create_account");
        assert_eq!(events[0].request["adminPass"], "***");
        assert_eq!(events[0].request["ownerPassword"], "***");
        assert_eq!(events[0].request["domainName"], "example.com");
        assert_eq!(events[0].response.as_ref().unwrap()["createWebSiteStatus"], true);
    }

    #[tokio::test]
    async fn audit_records_api_failures_too() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/verifyConn");
                then.status(503).body("maintenance");
            })
            .await;

        let sink = RecordingSink::new();
        let provisioner = Provisioner::new().with_sink(sink.clone());
        let conn = mock_connection(&server);
        let result = provisioner.test_connection(&conn).await;
        assert!(!result.success);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].error.as_ref().unwrap().contains("503"));
    }
}
