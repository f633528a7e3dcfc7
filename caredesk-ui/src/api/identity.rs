//! Identity-based technician pre-constraint.
//!
//! Authentication itself is owned by an external session shell; it hands
//! the current identity to this module as a request header. The only use
//! made of it here is scoping: a non-administrator identity has its
//! technician filter dimension forced to itself, so technicians see their
//! own complaints regardless of what the browser requested. The core
//! filter engine stays identity-agnostic.

use axum::http::HeaderMap;

use caredesk_common::config::AuthConfig;
use caredesk_common::filter::Selection;

/// Header carrying the current identity, set by the session shell.
pub const IDENTITY_HEADER: &str = "x-caredesk-user";

/// The resolved request identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Identity string, or `None` when the session shell sent no header
    /// (an unconstrained read-only viewer).
    pub user: Option<String>,
    pub is_admin: bool,
}

/// Resolve the request identity from headers and the admin list.
pub fn identity_from_headers(headers: &HeaderMap, auth: &AuthConfig) -> Identity {
    let user = headers
        .get(IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let is_admin = match &user {
        Some(name) => auth.admin_users.iter().any(|admin| admin == name),
        None => true,
    };

    Identity { user, is_admin }
}

/// Apply the identity constraint to the requested technician selection.
///
/// Administrators (and anonymous viewers) keep whatever they asked for; a
/// technician identity overrides the request with itself.
pub fn constrain_technician(
    identity: &Identity,
    requested: Selection<String>,
) -> Selection<String> {
    match (&identity.user, identity.is_admin) {
        (Some(user), false) => Selection::AnyOf(vec![user.clone()]),
        _ => requested,
    }
}
