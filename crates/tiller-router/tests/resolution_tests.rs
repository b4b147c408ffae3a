//! Integration tests for tiller-router
//!
//! Covers the public surface end to end:
//! - Pattern compilation and the positional-parameter round trip
//! - Routing-target classification
//! - Registry resolution across mounts, methods, and split depths

use tiller_router::*;

#[test]
fn test_pattern_round_trip_through_registry() {
    let mut registry = ActionRegistry::new();
    registry
        .register(
            "/product",
            vec![ExecuteDef::new("land", RequestMethod::Any, "{}/land/{}")],
        )
        .unwrap();

    let resolved = registry
        .resolve("/product/mystic/land/oneman/", "GET")
        .unwrap();
    assert_eq!(resolved.action_path, "/product");
    assert_eq!(resolved.param_path, "mystic/land/oneman");
    assert_eq!(
        resolved.params,
        vec!["mystic".to_string(), "oneman".to_string()]
    );
}

#[test]
fn test_compilation_errors_name_the_offending_index() {
    let err = UrlPattern::compile("a}b", "/sea#index").unwrap_err();
    assert!(matches!(err, PatternError::BeginBraceNotFound { index: 1, .. }));

    let err = UrlPattern::compile("ab{", "/sea#index").unwrap_err();
    assert!(matches!(err, PatternError::EndBraceNotFound { index: 2, .. }));
}

#[test]
fn test_params_are_positional_and_ordered() {
    let pattern = UrlPattern::compile("{}/{}/{}", "/sea#index").unwrap();
    assert_eq!(
        pattern.param_names(),
        &["arg0".to_string(), "arg1".to_string(), "arg2".to_string()]
    );
    assert_eq!(
        pattern.match_params("a/b/c"),
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn test_classification_is_independent_of_registration() {
    // Classification only looks at the path shape; resolution decides the rest
    assert!(is_routing_target("/not/registered/anywhere/"));
    assert!(!is_routing_target("/not/registered/anywhere.png"));
}

#[test]
fn test_resolution_ignores_trailing_slash() {
    let mut registry = ActionRegistry::new();
    registry
        .register("/member/list", vec![ExecuteDef::index()])
        .unwrap();

    assert!(registry.resolve("/member/list/", "GET").is_some());
    assert!(registry.resolve("/member/list", "GET").is_some());
}

#[test]
fn test_dotted_params_resolve_when_registered() {
    // "/member/1.2.3/" classifies as a routing target; the resolver then
    // captures the dotted segment like any other
    let mut registry = ActionRegistry::new();
    registry
        .register(
            "/member",
            vec![ExecuteDef::new("version", RequestMethod::Get, "{}")],
        )
        .unwrap();

    let resolved = registry.resolve("/member/1.2.3/", "GET").unwrap();
    assert_eq!(resolved.params, vec!["1.2.3".to_string()]);
}

#[test]
fn test_custom_policy_overrides() {
    struct ForceAdmin;
    impl RoutingPolicy for ForceAdmin {
        fn is_forced_routing_target(&self, path: &str) -> bool {
            path.starts_with("/admin/")
        }
        fn suppresses_trailing_slash_redirect(&self, path: &str) -> bool {
            path.starts_with("/api/")
        }
    }

    let policy = ForceAdmin;
    assert!(policy.is_forced_routing_target("/admin/export.csv"));
    assert!(!policy.is_forced_routing_target("/member/export.csv"));
    assert!(policy.suppresses_trailing_slash_redirect("/api/member"));
}
