//! Error types for request-target and claim checks.
//!
//! The caller-visible text of a [`TargetError`] is fixed; the
//! [`MalformedReason`] it carries is for logs only.

use std::fmt;

/// Errors from [`parse_request_target`](crate::request_target::parse_request_target).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// No `(request-target)` value was signed.
    #[error("no (request-target) specified in header")]
    Missing,

    /// The `(request-target)` value does not describe this login.
    #[error("incorrect (request-target) specified in header")]
    Malformed {
        /// What was wrong with it.
        reason: MalformedReason,
    },
}

impl TargetError {
    pub(crate) fn malformed(reason: MalformedReason) -> Self {
        Self::Malformed { reason }
    }
}

/// Why a `(request-target)` value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line did not split into exactly a method and a path.
    TokenCount(usize),
    /// The method is not `get`.
    Method(String),
    /// The path has fewer segments than `v1/auth/<mount>/login/<role>`.
    TooFewSegments(usize),
    /// The first segment is not the API version.
    Version(String),
    /// The second segment is not `auth`.
    AuthSegment(String),
    /// The second-to-last segment is not `login`.
    LoginSegment(String),
    /// The last segment is not the requested role.
    RoleMismatch {
        /// Role the caller asked for.
        expected: String,
        /// Role named in the signed path.
        found: String,
    },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCount(n) => write!(f, "expected `<method> <path>`, got {n} tokens"),
            Self::Method(m) => write!(f, "method {m:?} is not GET"),
            Self::TooFewSegments(n) => write!(f, "path has {n} segments, need at least 5"),
            Self::Version(s) => write!(f, "unexpected API version segment {s:?}"),
            Self::AuthSegment(s) => write!(f, "expected `auth` segment, got {s:?}"),
            Self::LoginSegment(s) => write!(f, "expected `login` segment, got {s:?}"),
            Self::RoleMismatch { expected, found } => {
                write!(f, "path names role {found:?}, request names {expected:?}")
            }
        }
    }
}

/// The `ptype` claim is missing or names no known principal type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized principalType: {0}")]
pub struct UnrecognizedPrincipalType(pub String);
