/// Routing-target classification
///
/// Decides whether a request path belongs to the action router or should fall
/// through to static-resource handling.

/// Returns true if the path should be routed to an action.
///
/// Legacy convention, preserved exactly: action paths end with `/`, static
/// assets carry a file extension and do not. A path containing a literal `.`
/// that does not end with `/` is treated as a static resource. The trailing
/// slash wins over the dot, so version-like segments stay routable:
///
/// ```
/// use tiller_router::is_routing_target;
///
/// assert!(is_routing_target("/member/list/"));
/// assert!(!is_routing_target("/member/list.jsp"));
/// assert!(is_routing_target("/member/1.2.3/"));
/// assert!(!is_routing_target("/member/1.2.3"));
/// ```
pub fn is_routing_target(path: &str) -> bool {
    !(path.contains('.') && !path.ends_with('/'))
}

/// Per-deployment overrides of the routing decision.
///
/// Both hooks default to "no override"; implementations are consulted with
/// the request path already relative to the context path.
pub trait RoutingPolicy: Send + Sync {
    /// Claim a path for routing even when the heuristic says static.
    fn is_forced_routing_target(&self, _path: &str) -> bool {
        false
    }

    /// Suppress the trailing-slash redirect for a resolvable GET path.
    fn suppresses_trailing_slash_redirect(&self, _path: &str) -> bool {
        false
    }
}

/// Policy with no overrides; the heuristic alone decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRoutingPolicy;

impl RoutingPolicy for DefaultRoutingPolicy {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/member/list/", true)]
    #[case("/member/list.jsp", false)]
    #[case("/member/1.2.3/", true)]
    #[case("/member/1.2.3", false)]
    #[case("/", true)]
    #[case("/member/list", true)]
    #[case("/styles/main.css", false)]
    #[case("/img/sea.jpg", false)]
    fn test_routing_target_heuristic(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_routing_target(path), expected, "path: {}", path);
    }

    #[test]
    fn test_default_policy_has_no_overrides() {
        let policy = DefaultRoutingPolicy;
        assert!(!policy.is_forced_routing_target("/member/list.jsp"));
        assert!(!policy.suppresses_trailing_slash_redirect("/member/list"));
    }
}
