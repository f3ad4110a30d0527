use std::fmt;

/// The fixed set of remote operations this client knows how to call.
///
/// Endpoint names are wire-exact path segments under `/api/` on the panel;
/// they are never derived from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateWebsite,
    SubmitWebsiteStatus,
    VerifyConn,
    DeleteWebsite,
    ChangeUserPassApi,
    ChangePackageApi,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::CreateWebsite => "createWebsite",
            Endpoint::SubmitWebsiteStatus => "submitWebsiteStatus",
            Endpoint::VerifyConn => "verifyConn",
            Endpoint::DeleteWebsite => "deleteWebsite",
            Endpoint::ChangeUserPassApi => "changeUserPassAPI",
            Endpoint::ChangePackageApi => "changePackageAPI",
        }
    }

    /// All endpoints, for diagnostics that probe the remote API surface.
    pub fn all() -> [Endpoint; 6] {
        [
            Endpoint::CreateWebsite,
            Endpoint::SubmitWebsiteStatus,
            Endpoint::VerifyConn,
            Endpoint::DeleteWebsite,
            Endpoint::ChangeUserPassApi,
            Endpoint::ChangePackageApi,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
