//! End-to-end tests for the OCI login pipeline.
//!
//! Each test builds an [`OciAuthBackend`] over an in-memory store and the
//! static identity provider, then drives it the way the host would: with
//! the JSON fields of a login request and a fresh request context.
//!
//! ```text
//! RUST_LOG=ociauth_login=trace cargo test -p ociauth-integration
//! ```

use std::sync::{Arc, Once};

use ociauth_core::{OciAuthConfig, Ocid};
use ociauth_login::{InMemoryStorage, OciAuthBackend, StaticIdentityClient, StaticIdentityClientFactory};
use ociauth_model::{Claim, ConfigEntry, LoginFields, Principal, RoleEntry};

static INIT: Once = Once::new();

/// Home tenancy of every fixture.
pub const HOME_TENANCY: &str = "ocid1.tenancy.oc1..home";
/// A tenancy other than the home one.
pub const FOREIGN_TENANCY: &str = "ocid1.tenancy.oc1..foreign";
/// Subject id of the fixture principal.
pub const SUBJECT: &str = "ocid1.instance.oc1.iad.subject";
/// Signature the static provider accepts for the fixture principal.
pub const SIGNATURE: &str = r#"Signature version="1",keyId="ST$token",algorithm="rsa-sha256""#;

/// An allow-listed group of the fixture role.
pub const GROUP_A: &str = "ocid1.group.oc1..a";
/// An allow-listed group of the fixture role.
pub const GROUP_B: &str = "ocid1.dynamicgroup.oc1..b";
/// An allow-listed group of the fixture role.
pub const GROUP_C: &str = "ocid1.group.oc1..c";
/// A group outside the fixture role's allow-list.
pub const GROUP_D: &str = "ocid1.group.oc1..d";

/// Name of the fixture role.
pub const ROLE: &str = "my-role";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        let fallback = OciAuthConfig::from_env().log_level;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_test_writer()
            .init();
    });
}

/// A backend wired to an in-memory store and a static identity provider.
#[derive(Debug)]
pub struct Fixture {
    /// The backend under test.
    pub backend: Arc<OciAuthBackend>,
    /// Its storage.
    pub storage: Arc<InMemoryStorage>,
    /// Its identity client factory.
    pub factory: Arc<StaticIdentityClientFactory>,
}

/// Parse an OCID fixture.
pub fn ocid(s: &str) -> anyhow::Result<Ocid> {
    Ok(Ocid::new(s)?)
}

/// A principal of type `ptype` in `tenant`.
#[must_use]
pub fn principal(ptype: &str, tenant: &str) -> Principal {
    Principal {
        subject_id: Some(SUBJECT.to_owned()),
        tenant_id: Some(tenant.to_owned()),
        claims: vec![
            Claim::new("ptype", ptype),
            Claim::new("h_host", "auth.us-ashburn-1.oraclecloud.com"),
        ],
    }
}

/// Seed a store with the home tenancy config and the fixture role.
pub fn seeded_storage() -> anyhow::Result<InMemoryStorage> {
    let storage = InMemoryStorage::new();
    storage.put_config(&ConfigEntry::new(HOME_TENANCY))?;
    storage.put_role(&RoleEntry::new(ROLE, [GROUP_A, GROUP_B, GROUP_C])?)?;
    Ok(storage)
}

/// A fixture whose principal is `principal` and belongs to `groups`.
pub fn fixture_with(principal: Principal, groups: &[&str]) -> anyhow::Result<Fixture> {
    init_tracing();

    let groups = groups.iter().map(|g| ocid(g)).collect::<anyhow::Result<Vec<_>>>()?;
    let client = StaticIdentityClient::new()
        .with_principal(SIGNATURE, principal)
        .with_memberships(SUBJECT, groups);
    let factory = Arc::new(StaticIdentityClientFactory::new(client));
    fixture_from_factory(factory)
}

/// A fixture around an existing factory.
pub fn fixture_from_factory(factory: Arc<StaticIdentityClientFactory>) -> anyhow::Result<Fixture> {
    init_tracing();

    let backend = OciAuthBackend::new(OciAuthConfig::from_env(), factory.clone())?;
    Ok(Fixture {
        backend: Arc::new(backend),
        storage: Arc::new(seeded_storage()?),
        factory,
    })
}

/// A fixture with an instance principal in the home tenancy, member of `groups`.
pub fn fixture(groups: &[&str]) -> anyhow::Result<Fixture> {
    fixture_with(principal("instance", HOME_TENANCY), groups)
}

/// Login fields as the host would decode them from a request body.
pub fn login_fields(role: &str, auth_type: &str, target: &str) -> anyhow::Result<LoginFields> {
    let body = serde_json::json!({
        "role": role,
        "auth_type": auth_type,
        "request_headers": {
            "(request-target)": [target],
            "Authorization": [SIGNATURE],
            "Date": ["Tue, 01 Oct 2024 10:00:00 GMT"],
            "Host": "auth.example.com",
        },
    });
    Ok(serde_json::from_value(body)?)
}

/// Login fields for a well-formed login to `role`.
pub fn valid_login(role: &str) -> anyhow::Result<LoginFields> {
    login_fields(role, "ip", &format!("get /v1/auth/oci/login/{role}"))
}

mod test_login;
mod test_resolve_role;
