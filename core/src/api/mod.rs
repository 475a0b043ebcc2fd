//! Resource methods, one module per endpoint family.
//!
//! Each method is a fixed (verb, path, payload, result) mapping onto
//! `GrafanaClient::request` or `GrafanaClient::request_discard`.

mod builtin_roles;
mod roles;
mod teams;
mod users;

use std::borrow::Cow;

use crate::error::{ApiError, Result};

pub use teams::DEFAULT_TEAM_PAGE_SIZE;

/// Percent-encode a free-text path segment such as a role UID.
///
/// Empty and dot segments are rejected: URL normalization would fold them
/// into the parent path, and `%2E` is treated as a dot as well.
pub(crate) fn segment(raw: &str) -> Result<Cow<'_, str>> {
    if matches!(raw, "" | "." | "..") {
        return Err(ApiError::InvalidArgument(format!(
            "{raw:?} is not a valid path segment"
        )));
    }
    Ok(urlencoding::encode(raw))
}
