/// URL pattern compilation
///
/// Turns a declared route template like `"{}/land/{}"` into a compiled match
/// expression plus the ordered list of positional parameter slots.
use regex::Regex;
use thiserror::Error;

/// Errors raised while compiling a declared url pattern.
///
/// Every variant is a configuration-time failure: it surfaces when the owning
/// action is registered, before any request is served. `owner` identifies the
/// declaring action/execute for the error message.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `}` appeared with no `{` before it.
    #[error("begin brace not found for end brace at index {index} in url pattern '{pattern}' ({owner})")]
    BeginBraceNotFound {
        pattern: String,
        owner: String,
        index: usize,
    },

    /// A `{` was never closed before the end of the pattern.
    #[error("end brace not found for begin brace at index {index} in url pattern '{pattern}' ({owner})")]
    EndBraceNotFound {
        pattern: String,
        owner: String,
        index: usize,
    },

    /// The placeholder body was non-empty; only anonymous `{}` is supported.
    #[error("named parameter '{name}' unsupported at index {index} in url pattern '{pattern}' ({owner}): use anonymous '{{}}'")]
    NamedParameterUnsupported {
        pattern: String,
        owner: String,
        name: String,
        index: usize,
    },

    /// The generated expression did not compile (e.g. a stray regex
    /// metacharacter in the literal part of the template).
    #[error("url pattern '{pattern}' ({owner}) compiled to an invalid expression")]
    InvalidExpression {
        pattern: String,
        owner: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// Fragment emitted for each anonymous placeholder: one path segment.
const ELEMENT_EXPRESSION: &str = "([^/]+)";

/// An immutable compiled route template.
///
/// Built once per declared execute at configuration time and cached for the
/// process lifetime; matching is read-only and safe for concurrent use.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    expression: String,
    regex: Regex,
    params: Vec<String>,
}

impl UrlPattern {
    /// Compiles a declared pattern string.
    ///
    /// Scans character by character:
    /// - `{` records a placeholder start
    /// - `}` closes it, requiring an empty body, and emits a one-segment
    ///   capture into the expression
    /// - anything else outside a placeholder is copied verbatim (a literal
    ///   `.` stays a regex dot; the routing heuristic depends on dots staying
    ///   untouched)
    ///
    /// Placeholders are positional only: each gets a synthetic name
    /// `arg0`, `arg1`, ... in declaration order.
    pub fn compile(source: &str, owner: &str) -> Result<Self, PatternError> {
        let mut expression = String::with_capacity(source.len() + 16);
        let mut params: Vec<String> = Vec::new();
        let mut pending_begin: Option<usize> = None;

        for (index, ch) in source.char_indices() {
            match ch {
                '{' => {
                    // Nested begin brace means the previous one was never closed
                    if let Some(begin) = pending_begin {
                        return Err(PatternError::EndBraceNotFound {
                            pattern: source.to_string(),
                            owner: owner.to_string(),
                            index: begin,
                        });
                    }
                    pending_begin = Some(index);
                }
                '}' => match pending_begin.take() {
                    None => {
                        return Err(PatternError::BeginBraceNotFound {
                            pattern: source.to_string(),
                            owner: owner.to_string(),
                            index,
                        });
                    }
                    Some(begin) => {
                        let body = &source[begin + 1..index];
                        if !body.is_empty() {
                            return Err(PatternError::NamedParameterUnsupported {
                                pattern: source.to_string(),
                                owner: owner.to_string(),
                                name: body.to_string(),
                                index: begin,
                            });
                        }
                        expression.push_str(ELEMENT_EXPRESSION);
                        params.push(format!("arg{}", params.len()));
                    }
                },
                _ => {
                    // Characters inside a pending placeholder form its body,
                    // judged when the end brace arrives
                    if pending_begin.is_none() {
                        expression.push(ch);
                    }
                }
            }
        }

        if let Some(begin) = pending_begin {
            return Err(PatternError::EndBraceNotFound {
                pattern: source.to_string(),
                owner: owner.to_string(),
                index: begin,
            });
        }

        let regex = Regex::new(&format!("^{}$", expression)).map_err(|e| {
            PatternError::InvalidExpression {
                pattern: source.to_string(),
                owner: owner.to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            source: source.to_string(),
            expression,
            regex,
            params,
        })
    }

    /// Matches a runtime parameter path, returning captured positional values
    /// in declaration order. Values are returned as captured (still
    /// percent-encoded); decoding happens at the dispatch boundary.
    pub fn match_params(&self, param_path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(param_path)?;
        let mut values = Vec::with_capacity(self.params.len());
        for i in 1..=self.params.len() {
            values.push(caps.get(i)?.as_str().to_string());
        }
        Some(values)
    }

    /// The declared pattern string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The generated match expression (unanchored form).
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Synthetic positional parameter names, in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Whether the pattern has no placeholders at all.
    pub fn is_static(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_single_placeholder() {
        let pattern = UrlPattern::compile("{}", "/member/edit#edit").unwrap();
        assert_eq!(pattern.expression(), "([^/]+)");
        assert_eq!(pattern.param_names(), &["arg0".to_string()]);
    }

    #[test]
    fn test_compile_mixed_literals_and_placeholders() {
        let pattern = UrlPattern::compile("{}/land/{}", "/product#land").unwrap();
        assert_eq!(pattern.expression(), "([^/]+)/land/([^/]+)");
        assert_eq!(
            pattern.param_names(),
            &["arg0".to_string(), "arg1".to_string()]
        );
    }

    #[test]
    fn test_compile_consecutive_placeholders() {
        let pattern = UrlPattern::compile("{}{}", "/sea#land").unwrap();
        assert_eq!(pattern.param_count(), 2);
        assert_eq!(pattern.expression(), "([^/]+)([^/]+)");
    }

    #[test]
    fn test_compile_empty_pattern() {
        let pattern = UrlPattern::compile("", "/member/list#index").unwrap();
        assert_eq!(pattern.expression(), "");
        assert_eq!(pattern.param_count(), 0);
        assert!(pattern.is_static());
        // An empty expression matches only the empty param path
        assert_eq!(pattern.match_params(""), Some(vec![]));
        assert_eq!(pattern.match_params("3"), None);
    }

    #[test]
    fn test_param_count_equals_placeholder_count() {
        for (source, expected) in [("{}", 1), ("{}/{}", 2), ("{}/{}/{}", 3), ("a/b", 0)] {
            let pattern = UrlPattern::compile(source, "/test#index").unwrap();
            assert_eq!(pattern.param_count(), expected, "pattern: {}", source);
        }
    }

    #[test]
    fn test_literal_dot_preserved_verbatim() {
        let pattern = UrlPattern::compile("v1.2/{}", "/api#show").unwrap();
        assert_eq!(pattern.expression(), "v1.2/([^/]+)");
    }

    #[test]
    fn test_end_brace_without_begin() {
        let err = UrlPattern::compile("sea}", "/wharf#index").unwrap_err();
        match err {
            PatternError::BeginBraceNotFound { index, .. } => assert_eq!(index, 3),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_begin_brace_without_end() {
        let err = UrlPattern::compile("sea/{", "/wharf#index").unwrap_err();
        match err {
            PatternError::EndBraceNotFound { index, .. } => assert_eq!(index, 4),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_nested_begin_brace() {
        let err = UrlPattern::compile("{{}}", "/wharf#index").unwrap_err();
        assert!(matches!(err, PatternError::EndBraceNotFound { index: 0, .. }));
    }

    #[test]
    fn test_named_parameter_rejected() {
        let err = UrlPattern::compile("{memberId}", "/member/edit#edit").unwrap_err();
        match err {
            PatternError::NamedParameterUnsupported { name, index, .. } => {
                assert_eq!(name, "memberId");
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_message_names_owner_and_pattern() {
        let err = UrlPattern::compile("{id}", "/member/edit#edit").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("{id}"));
        assert!(message.contains("/member/edit#edit"));
    }

    #[test]
    fn test_match_params_round_trip() {
        let pattern = UrlPattern::compile("{}/land/{}", "/product#land").unwrap();
        assert_eq!(
            pattern.match_params("mystic/land/oneman"),
            Some(vec!["mystic".to_string(), "oneman".to_string()])
        );
        assert_eq!(pattern.match_params("mystic/sea/oneman"), None);
        assert_eq!(pattern.match_params("mystic/land"), None);
    }

    #[test]
    fn test_placeholder_rejects_slash() {
        let pattern = UrlPattern::compile("{}", "/member/edit#edit").unwrap();
        assert_eq!(pattern.match_params("3"), Some(vec!["3".to_string()]));
        assert_eq!(pattern.match_params("3/4"), None);
    }
}
