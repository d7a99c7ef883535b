//! Admin identity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ruhiya_core::{AdminUserId, Email};

/// An admin identity as stored in the credential store.
///
/// The password hash is never part of this struct; repositories that need
/// it return it separately so it cannot leak into a response by accident.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated admin identity carried by a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
}

impl CurrentAdmin {
    /// Display label recorded on revisions.
    ///
    /// Fixed: the system assumes a single admin actor, so revisions carry a
    /// constant label rather than a per-user audit trail.
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        "Admin"
    }
}
