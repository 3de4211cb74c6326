//! Resolve-role integration tests.

#[cfg(test)]
mod tests {
    use ociauth_login::response::{error_response, resolve_role_response};
    use ociauth_login::{ErrorKind, RequestContext};
    use ociauth_model::{ResolveRoleFields, RoleEntry};

    use crate::{GROUP_B, ROLE, fixture};

    fn resolve_fields(role: &str) -> ResolveRoleFields {
        ResolveRoleFields {
            role: Some(role.to_owned()),
        }
    }

    #[tokio::test]
    async fn test_should_resolve_only_existing_roles() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        fx.storage.put_role(&RoleEntry::new("readers", [GROUP_B])?)?;
        let ctx = RequestContext::new();

        for role in [ROLE, "readers"] {
            let resolved = fx
                .backend
                .resolve_role(&ctx, fx.storage.as_ref(), &resolve_fields(role))
                .await?;
            assert_eq!(resolved, role);
        }
        for role in ["writers", "MY-ROLE", "my-role "] {
            let err = fx
                .backend
                .resolve_role(&ctx, fx.storage.as_ref(), &resolve_fields(role))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), format!("invalid role name {role:?}"));
            assert_eq!(err.kind(), ErrorKind::CallerInput);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_should_resolve_without_touching_identity_provider() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        for _ in 0..3 {
            fx.backend
                .resolve_role(&RequestContext::new(), fx.storage.as_ref(), &resolve_fields(ROLE))
                .await?;
        }
        assert_eq!(fx.factory.attempts(), 0);
        assert_eq!(fx.factory.client().authenticate_calls(), 0);
        assert_eq!(fx.factory.client().filter_calls(), 0);
        assert!(!fx.backend.client_initialized().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_render_resolve_results() -> anyhow::Result<()> {
        let fx = fixture(&[GROUP_B])?;
        let ctx = RequestContext::new();

        let role = fx
            .backend
            .resolve_role(&ctx, fx.storage.as_ref(), &resolve_fields(ROLE))
            .await?;
        let body: serde_json::Value =
            serde_json::from_slice(resolve_role_response(&role, ctx.request_id()).body())?;
        assert_eq!(body["data"]["role"], ROLE);

        let err = fx
            .backend
            .resolve_role(&ctx, fx.storage.as_ref(), &ResolveRoleFields::default())
            .await
            .unwrap_err();
        let body: serde_json::Value =
            serde_json::from_slice(error_response(&err, ctx.request_id()).body())?;
        assert_eq!(body["errors"][0], "Role is not specified");
        Ok(())
    }
}
