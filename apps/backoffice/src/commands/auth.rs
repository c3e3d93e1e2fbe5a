//! # Auth Commands
//!
//! Sign in, sign out, and the navigation the signed-in role may see.

use serde::Serialize;
use sole_core::types::{Section, User};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{CartState, SessionState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    /// Menu entries for the role, in display order
    pub sections: Vec<Section>,
}

impl From<User> for SessionResponse {
    fn from(user: User) -> Self {
        SessionResponse {
            sections: user.role.sections(),
            user,
        }
    }
}

/// Signs in with one of the fixed accounts.
///
/// ## Returns
/// The signed-in user and the sections their role may open;
/// `UNAUTHORIZED` on wrong credentials.
pub fn login(session: &SessionState, username: String, password: String) -> ApiResult<SessionResponse> {
    debug!(username = %username, "login command");
    Ok(session.login(username.trim(), &password)?.into())
}

/// Signs out and drops any cart in progress.
pub fn logout(session: &SessionState, cart: &CartState) {
    debug!("logout command");
    cart.with_cart_mut(|c| c.clear());
    session.logout();
}

/// Currently signed-in user.
pub fn current_session(session: &SessionState) -> ApiResult<SessionResponse> {
    debug!("current_session command");
    Ok(session.require_user()?.into())
}
