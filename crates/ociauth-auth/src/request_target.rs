//! `(request-target)` validation.
//!
//! The signed `(request-target)` line binds the signature to one method and
//! path. A login is only accepted when that line is
//! `get /v1/auth/<mount...>/login/<role>` for the role being requested, so a
//! signature captured for one role or route cannot be replayed for another.
//! The mount segments are not checked; the backend may be mounted anywhere.

use tracing::trace;

use crate::error::{MalformedReason, TargetError};

/// Name of the signing pseudo-header carrying the request target.
pub const REQUEST_TARGET_HEADER: &str = "(request-target)";

const LOGIN_METHOD: &str = "get";
const API_VERSION: &str = "v1";
const AUTH_SEGMENT: &str = "auth";
const LOGIN_SEGMENT: &str = "login";
const MIN_SEGMENTS: usize = 5;

/// A validated request target, with the tokens as the client signed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    method: String,
    path: String,
}

impl RequestTarget {
    /// The method token.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The path token.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The mount segments between `auth` and `login`, joined with `/`.
    #[must_use]
    pub fn mount(&self) -> String {
        // only built by parse_request_target, which requires MIN_SEGMENTS
        let segments = split_path(&self.path);
        debug_assert!(segments.len() >= MIN_SEGMENTS);
        segments[2..segments.len() - 2].join("/")
    }
}

/// Validate the signed `(request-target)` values against a login for `role`.
///
/// Only the first value is considered.
///
/// # Errors
///
/// Returns [`TargetError::Missing`] if `lines` is empty, and
/// [`TargetError::Malformed`] if the first line is not a `GET` of the login
/// route for exactly `role`.
pub fn parse_request_target(lines: &[String], role: &str) -> Result<RequestTarget, TargetError> {
    let Some(line) = lines.first() else {
        return Err(TargetError::Missing);
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[method, path] = tokens.as_slice() else {
        return Err(reject(MalformedReason::TokenCount(tokens.len())));
    };

    if !method.eq_ignore_ascii_case(LOGIN_METHOD) {
        return Err(reject(MalformedReason::Method(method.to_owned())));
    }

    let segments = split_path(path);
    if segments.len() < MIN_SEGMENTS {
        return Err(reject(MalformedReason::TooFewSegments(segments.len())));
    }
    if segments[0] != API_VERSION {
        return Err(reject(MalformedReason::Version(segments[0].to_owned())));
    }
    if segments[1] != AUTH_SEGMENT {
        return Err(reject(MalformedReason::AuthSegment(segments[1].to_owned())));
    }
    let n = segments.len();
    if segments[n - 2] != LOGIN_SEGMENT {
        return Err(reject(MalformedReason::LoginSegment(
            segments[n - 2].to_owned(),
        )));
    }
    if segments[n - 1] != role {
        return Err(reject(MalformedReason::RoleMismatch {
            expected: role.to_owned(),
            found: segments[n - 1].to_owned(),
        }));
    }

    Ok(RequestTarget {
        method: method.to_owned(),
        path: path.to_owned(),
    })
}

fn split_path(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

fn reject(reason: MalformedReason) -> TargetError {
    trace!(%reason, "rejected request target");
    TargetError::malformed(reason)
}
