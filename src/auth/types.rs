//! Types for the admin endpoints

use serde::{Deserialize, Serialize};

use crate::models::SettingsPatch;

/// The signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// The user ID
    #[serde(deserialize_with = "crate::models::string_or_number")]
    pub id: String,

    /// The login name, shown in the admin header
    pub username: String,
}

/// Login body
#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub user: AdminUser,
}

/// Verify response
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponse {
    pub user: AdminUser,
}

/// Whether an administrator account exists yet
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    pub has_admin: bool,
}

/// First-run setup body: the admin account and optionally the initial settings
#[derive(Debug, Serialize)]
pub(crate) struct SetupRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,
}
