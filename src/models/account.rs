use serde::{Deserialize, Serialize};

/// Signed-in user profile as returned by the backend.
///
/// Only a few fields are read by the UI; the rest is kept verbatim so the
/// stored profile survives backend schema changes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct AccountInfo {
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl AccountInfo {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(|v| v.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(|v| v.as_str())
    }

    pub fn role(&self) -> Option<&str> {
        self.extra.get("role").and_then(|v| v.as_str())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role(), Some("admin") | Some("super_admin"))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    pub user: AccountInfo,
}
