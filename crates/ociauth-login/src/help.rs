//! Help text for the backend and its login paths.
//!
//! The host renders these through [`OciAuthBackend::help`],
//! [`OciAuthBackend::login_help`] and [`OciAuthBackend::resolve_role_help`].
//!
//! [`OciAuthBackend::help`]: crate::OciAuthBackend::help
//! [`OciAuthBackend::login_help`]: crate::OciAuthBackend::login_help
//! [`OciAuthBackend::resolve_role_help`]: crate::OciAuthBackend::resolve_role_help

/// Synopsis of `login/<role>`.
pub const LOGIN_SYNOPSIS: &str = "Authenticates using OCI credentials";

/// Description of `login/<role>`.
pub const LOGIN_DESCRIPTION: &str = "\
Authenticates using OCI credentials such as a user API key, an instance \
principal, or a resource principal. The request carries the client's signed \
headers; the signature must cover a GET of this login path for the requested \
role, and the caller must belong to one of the role's groups or dynamic groups.";

/// Synopsis and description of the role-resolving `login` path.
pub const RESOLVE_SYNOPSIS: &str =
    "Determines the role that would be used for login from a valid OCI login request";

/// Help for the backend as a whole.
pub const BACKEND_HELP: &str = "\
The OCI auth backend authenticates OCI principals (users, instances, and \
resources) and authorizes them through roles.

A role is a set of allowed policies for specific entities. When an entity logs \
in, it requests a role; the backend checks that the entity is a member of one of \
the groups or dynamic groups allowed to use the role, and attaches the role's \
policies to the issued token.

Roles restrict access to the subset of secrets an entity needs, even if the \
entity has access to many more. This follows the least-privilege model.";

/// Synopsis and description of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathHelp {
    /// One-line summary.
    pub synopsis: &'static str,
    /// Longer description.
    pub description: &'static str,
}

/// Help for `login/<role>`.
pub const LOGIN_HELP: PathHelp = PathHelp {
    synopsis: LOGIN_SYNOPSIS,
    description: LOGIN_DESCRIPTION,
};

/// Help for the role-resolving `login` path.
pub const RESOLVE_ROLE_HELP: PathHelp = PathHelp {
    synopsis: RESOLVE_SYNOPSIS,
    description: RESOLVE_SYNOPSIS,
};
