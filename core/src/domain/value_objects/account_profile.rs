//! Outward-facing account projection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public projection of an account, safe to serialize in responses
///
/// The password hash and any pending verification or reset material never
/// leave the entity; this is the only account shape exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountProfile {
    /// Account identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number with country code
    pub phone: String,
}
