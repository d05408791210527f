/// Current-user context
///
/// A plain value passed explicitly to whatever needs the user id; there is no
/// process-wide singleton. Tests construct stubs directly.

use crate::db::Database;
use crate::error::Result;

/// Stamped on new recipes until a real login flow exists
pub const DEFAULT_USER_ID: &str = "user_17";

const USER_ID_PREFERENCE: &str = "current_user_id";

/// Identity of the local user session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Load the stored user id, creating and persisting the default on first
    /// run
    pub async fn bootstrap(db: &Database) -> Result<Self> {
        if let Some(stored) = db.get_preference(USER_ID_PREFERENCE).await? {
            return Ok(Self::new(stored));
        }

        db.set_preference(USER_ID_PREFERENCE, DEFAULT_USER_ID).await?;
        Ok(Self::new(DEFAULT_USER_ID))
    }
}
