//! Login pipeline integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use ociauth_core::Ocid;
    use ociauth_login::response::{error_response, login_response};
    use ociauth_login::{
        ErrorKind, IdentityClient, IdentityClientFactory, IdentityError, LoginError,
        OciAuthBackend, RequestContext, StaticIdentityClient,
    };
    use ociauth_model::{
        AuthType, AuthenticateClientRequest, AuthenticateClientResult,
        FilterGroupMembershipRequest, FilterGroupMembershipResult, RoleEntry, TokenSettings,
        TokenType,
    };

    use crate::{
        FOREIGN_TENANCY, GROUP_A, GROUP_B, GROUP_C, GROUP_D, HOME_TENANCY, ROLE, SIGNATURE,
        fixture, fixture_with, login_fields, ocid, principal, seeded_storage, valid_login,
    };

    /// A provider that answers membership queries with a fixed group list,
    /// whatever was submitted.
    #[derive(Debug)]
    struct FixedMembershipClient {
        inner: StaticIdentityClient,
        groups: Vec<Ocid>,
    }

    #[async_trait]
    impl IdentityClient for FixedMembershipClient {
        async fn authenticate_client(
            &self,
            request: AuthenticateClientRequest,
        ) -> Result<AuthenticateClientResult, IdentityError> {
            self.inner.authenticate_client(request).await
        }

        async fn filter_group_membership(
            &self,
            _request: FilterGroupMembershipRequest,
        ) -> Result<FilterGroupMembershipResult, IdentityError> {
            Ok(FilterGroupMembershipResult {
                group_ids: Some(self.groups.clone()),
                ..FilterGroupMembershipResult::default()
            })
        }
    }

    #[derive(Debug)]
    struct FixedMembershipFactory(Arc<FixedMembershipClient>);

    #[async_trait]
    impl IdentityClientFactory for FixedMembershipFactory {
        async fn create(
            &self,
            _auth_type: AuthType,
        ) -> Result<Arc<dyn IdentityClient>, ociauth_login::ClientError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_should_authorize_login_for_member_group() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        let ctx = RequestContext::new();

        let output = fx.backend.login(&ctx, fx.storage.as_ref(), &valid_login(ROLE)?).await?;
        assert_eq!(output.auth.role_name(), ROLE);
        assert!(!output.auth.renewable());

        let response = login_response(&output, ctx.request_id());
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert_eq!(body["auth"]["display_name"], ROLE);
        assert_eq!(body["auth"]["internal_data"]["role_name"], ROLE);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_deny_login_without_membership() -> anyhow::Result<()> {
        let fx = fixture(&[])?;
        let err = fx
            .backend
            .login(&RequestContext::new(), fx.storage.as_ref(), &valid_login(ROLE)?)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no membership OCIDs found");

        let response = error_response(&err, "req");
        assert_eq!(response.status(), 400);
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert_eq!(body["errors"][0], "no membership OCIDs found");
        Ok(())
    }

    #[tokio::test]
    async fn test_should_check_membership_outcomes_against_allow_list() -> anyhow::Result<()> {
        let storage = seeded_storage()?;
        let cases: [(Vec<&str>, Result<(), &str>); 3] = [
            (vec![], Err("no membership OCIDs found")),
            (vec![GROUP_D], Err("entity not a part of any of the Role OCIDs")),
            (vec![GROUP_B], Ok(())),
        ];

        for (groups, expected) in cases {
            let client = FixedMembershipClient {
                inner: StaticIdentityClient::new()
                    .with_principal(SIGNATURE, principal("resource", HOME_TENANCY)),
                groups: groups.iter().map(|g| ocid(g)).collect::<anyhow::Result<_>>()?,
            };
            let factory = Arc::new(FixedMembershipFactory(Arc::new(client)));
            let backend = OciAuthBackend::new(ociauth_core::OciAuthConfig::default(), factory)?;

            let result = backend
                .login(&RequestContext::new(), &storage, &valid_login(ROLE)?)
                .await;
            match expected {
                Ok(()) => assert_eq!(result?.auth.role_name(), ROLE),
                Err(message) => assert_eq!(result.unwrap_err().to_string(), message),
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_should_accept_any_allow_listed_group() -> anyhow::Result<()> {
        for group in [GROUP_A, GROUP_B, GROUP_C] {
            let fx = fixture(&[group, GROUP_D])?;
            fx.backend
                .login(&RequestContext::new(), fx.storage.as_ref(), &valid_login(ROLE)?)
                .await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_should_deny_unrecognized_principal_type() -> anyhow::Result<()> {
        let fx = fixture_with(principal("service", HOME_TENANCY), &[GROUP_B])?;
        let err = fx
            .backend
            .login(&RequestContext::new(), fx.storage.as_ref(), &valid_login(ROLE)?)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unrecognized principalType: service");
        assert_eq!(fx.factory.client().authenticate_calls(), 1);
        assert_eq!(fx.factory.client().filter_calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_accept_every_known_principal_type() -> anyhow::Result<()> {
        for ptype in ["resource", "instance", "user"] {
            let fx = fixture_with(principal(ptype, HOME_TENANCY), &[GROUP_B])?;
            fx.backend
                .login(&RequestContext::new(), fx.storage.as_ref(), &valid_login(ROLE)?)
                .await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_should_deny_principal_from_other_tenancy() -> anyhow::Result<()> {
        let fx = fixture_with(principal("user", FOREIGN_TENANCY), &[GROUP_B])?;
        let err = fx
            .backend
            .login(&RequestContext::new(), fx.storage.as_ref(), &valid_login(ROLE)?)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid Tenancy");
        assert_eq!(err.kind(), ErrorKind::CallerInput);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_accept_any_mount_path() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        for target in [
            "GET /v1/auth/oci/login/my-role",
            "get /v1/auth/oci-prod/login/my-role",
            "get /v1/auth/teams/platform/oci/login/my-role",
        ] {
            let fields = login_fields(ROLE, "instance", target)?;
            fx.backend
                .login(&RequestContext::new(), fx.storage.as_ref(), &fields)
                .await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_should_deny_replayed_signature_for_other_role() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        fx.storage
            .put_role(&RoleEntry::new("other-role", [GROUP_B])?)?;

        let fields = login_fields("other-role", "ip", "get /v1/auth/oci/login/my-role")?;
        let err = fx
            .backend
            .login(&RequestContext::new(), fx.storage.as_ref(), &fields)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "incorrect (request-target) specified in header");
        assert_eq!(fx.factory.attempts(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_deny_non_get_methods() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        for method in ["post", "PUT", "Delete"] {
            let fields = login_fields(ROLE, "ip", &format!("{method} /v1/auth/oci/login/my-role"))?;
            let err = fx
                .backend
                .login(&RequestContext::new(), fx.storage.as_ref(), &fields)
                .await
                .unwrap_err();
            assert!(matches!(err, LoginError::RequestTarget(_)));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_should_bind_role_token_settings() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_A])?;
        let role = RoleEntry::new(ROLE, [GROUP_A])?.with_token(TokenSettings {
            policies: vec!["db-read".to_owned(), "kv-read".to_owned()],
            ttl: 600,
            max_ttl: 1800,
            period: 300,
            bound_cidrs: vec!["10.0.0.0/8".to_owned()],
            token_type: TokenType::Service,
            ..TokenSettings::default()
        });
        fx.storage.put_role(&role)?;

        let output = fx
            .backend
            .login(&RequestContext::new(), fx.storage.as_ref(), &valid_login(ROLE)?)
            .await?;
        assert_eq!(output.auth.policies().len(), 2);
        assert_eq!(output.auth.max_ttl(), 1800);
        assert_eq!(output.auth.period(), 300);
        assert_eq!(output.auth.token_type(), TokenType::Service);
        assert!(!output.auth.renewable());
        Ok(())
    }

    #[tokio::test]
    async fn test_should_forward_request_id_to_provider() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        let ctx = RequestContext::with_request_id("host-req-7");
        fx.backend
            .login(&ctx, fx.storage.as_ref(), &valid_login(ROLE)?)
            .await?;
        assert_eq!(
            fx.factory.client().request_ids(),
            vec!["host-req-7".to_owned(), "host-req-7".to_owned()]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_should_hide_provisioning_failure_from_caller() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        let fields = login_fields(ROLE, "api_key", "get /v1/auth/oci/login/my-role")?;
        let err = fx
            .backend
            .login(&RequestContext::new(), fx.storage.as_ref(), &fields)
            .await
            .unwrap_err();

        let response = error_response(&err, "req");
        assert_eq!(response.status(), 500);
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert_eq!(body, serde_json::json!({ "errors": ["internal error"] }));
        Ok(())
    }

    #[test]
    fn test_should_reject_mistyped_request_body() {
        let body = serde_json::json!({ "role": ROLE, "request_headers": ["not", "a", "map"] });
        assert!(serde_json::from_value::<ociauth_model::LoginFields>(body).is_err());
    }
}
