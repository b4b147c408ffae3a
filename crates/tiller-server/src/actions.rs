// File: src/actions.rs
// Purpose: Demo action mounts and handlers for the reference server

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tiller::{
    boxed_handler, Config, ConfigRoutingPolicy, EngineError, ExecuteDef, RequestContext,
    RequestMethod, RoutingEngine,
};

/// Build the routing engine from the demo action set.
///
/// Patterns compile here; a malformed declaration aborts startup before the
/// listener binds.
pub fn build_engine(
    config: &Config,
    policy: Arc<ConfigRoutingPolicy>,
) -> Result<RoutingEngine, EngineError> {
    RoutingEngine::builder()
        .context_path(config.routing.context_path.clone())
        .policy(policy)
        .action("/", vec![ExecuteDef::index()])
        .action(
            "/member/list",
            vec![
                ExecuteDef::index(),
                ExecuteDef::new("detail", RequestMethod::Get, "{}"),
            ],
        )
        .action(
            "/product",
            vec![ExecuteDef::new("land", RequestMethod::Get, "{}/land/{}")],
        )
        .action(
            "/member/purchase",
            vec![ExecuteDef::new("create", RequestMethod::Post, "{}")],
        )
        .handler("/", "index", boxed_handler(welcome))
        .handler("/member/list", "index", boxed_handler(member_list))
        .handler("/member/list", "detail", boxed_handler(member_detail))
        .handler("/product", "land", boxed_handler(product_land))
        .handler("/member/purchase", "create", boxed_handler(purchase_create))
        .build()
}

async fn welcome(_ctx: RequestContext) -> Result<Response, anyhow::Error> {
    Ok("Welcome to Tiller".into_response())
}

async fn member_list(ctx: RequestContext) -> Result<Response, anyhow::Error> {
    let keyword = ctx.query.get("keyword").unwrap_or("");
    Ok(format!("member list (keyword: '{}')", keyword).into_response())
}

async fn member_detail(ctx: RequestContext) -> Result<Response, anyhow::Error> {
    let member_id: i64 = ctx
        .parse_param(0)
        .ok_or_else(|| anyhow::anyhow!("member id must be numeric"))?;
    Ok(format!("member {}", member_id).into_response())
}

async fn product_land(ctx: RequestContext) -> Result<Response, anyhow::Error> {
    let product = ctx.param(0).unwrap_or("unknown");
    let spot = ctx.param(1).unwrap_or("unknown");
    Ok(format!("product {} lands at {}", product, spot).into_response())
}

async fn purchase_create(ctx: RequestContext) -> Result<Response, anyhow::Error> {
    let product_id: i64 = ctx
        .parse_param(0)
        .ok_or_else(|| anyhow::anyhow!("product id must be numeric"))?;
    Ok((StatusCode::CREATED, format!("purchased product {}", product_id)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_engine_builds_and_resolves() {
        let config = Config::default();
        let policy = Arc::new(ConfigRoutingPolicy::from(&config.routing));
        let engine = build_engine(&config, policy).unwrap();

        let resolved = engine
            .registry()
            .resolve("/product/mystic/land/oneman/", "GET")
            .unwrap();
        assert_eq!(resolved.execute_name, "land");
        assert_eq!(
            resolved.params,
            vec!["mystic".to_string(), "oneman".to_string()]
        );
    }
}
