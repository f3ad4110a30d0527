//! Typed HTTP client for the CyberPanel control-panel API.
//!
//! One call is one POST to `{scheme}://{host}:{port}/api/{endpoint}` with a
//! JSON body, a bounded retry on transport failure, and a parsed JSON object
//! back. The operations and their wire shapes are the six endpoints the
//! billing integration uses; nothing here models panel state.

pub mod client_cache;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod requests;
pub mod response;
pub mod url_builder;

pub use client_cache::USER_AGENT;
pub use connection::{PanelConnection, RetryPolicy, TimeoutConfig};
pub use endpoint::Endpoint;
pub use error::{ClientError, ClientResult};
pub use executor::ApiClient;
pub use requests::{
    ApiRequest, ChangePackageRequest, ChangeUserPasswordRequest, CreateWebsiteRequest,
    DeleteWebsiteRequest, VerifyConnRequest, WebsiteState, WebsiteStateRequest,
};
pub use response::{
    ApiOutcome, ChangePackageResponse, ChangePasswordResponse, CreateWebsiteResponse,
    DeleteWebsiteResponse, Flag, PanelResponse, VerifyConnResponse, WebsiteStatusResponse,
};
pub use url_builder::{api_url, login_url};
