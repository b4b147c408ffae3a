/// Path utilities for action resolution
///
/// `PathSplits` is a lazy iterator over the candidate
/// `(action_path, param_path)` splits of a request path, longest action path
/// first. For `/member/list/3` it yields:
///
/// `("/member/list/3", "")` → `("/member/list", "3")` →
/// `("/member", "list/3")` → `("/", "member/list/3")`
///
/// Resolution walks the splits and stops at the first hit, so deeper mounts
/// always win over shallower ones. Zero-copy: every yielded pair borrows from
/// the input path.
#[derive(Clone)]
pub struct PathSplits<'a> {
    path: &'a str,
    cut: Option<usize>,
}

impl<'a> PathSplits<'a> {
    /// Creates the split iterator for a trimmed request path.
    ///
    /// The path must start with `/` and, except for the root itself, must not
    /// end with `/` (see [`trim_trailing_slash`]).
    pub fn new(path: &'a str) -> Self {
        debug_assert!(path.starts_with('/'), "path must be absolute: {}", path);
        debug_assert!(
            path == "/" || !path.ends_with('/'),
            "path must be trimmed: {}",
            path
        );
        let cut = if path == "/" { 0 } else { path.len() };
        Self {
            path,
            cut: Some(cut),
        }
    }
}

impl<'a> Iterator for PathSplits<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let cut = self.cut?;
        let action_path = if cut == 0 { "/" } else { &self.path[..cut] };
        let param_path = if cut >= self.path.len() {
            ""
        } else {
            &self.path[cut + 1..]
        };

        self.cut = if cut == 0 {
            None
        } else {
            self.path[..cut].rfind('/')
        };

        Some((action_path, param_path))
    }
}

/// Removes the trailing slash from a request path, keeping the root as `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_longest_first() {
        let splits: Vec<_> = PathSplits::new("/member/list/3").collect();
        assert_eq!(
            splits,
            vec![
                ("/member/list/3", ""),
                ("/member/list", "3"),
                ("/member", "list/3"),
                ("/", "member/list/3"),
            ]
        );
    }

    #[test]
    fn test_splits_single_segment() {
        let splits: Vec<_> = PathSplits::new("/member").collect();
        assert_eq!(splits, vec![("/member", ""), ("/", "member")]);
    }

    #[test]
    fn test_splits_root() {
        let splits: Vec<_> = PathSplits::new("/").collect();
        assert_eq!(splits, vec![("/", "")]);
    }

    #[test]
    fn test_splits_short_circuit() {
        // find() stops the walk at the first match
        let found = PathSplits::new("/a/b/c").find(|(action, _)| *action == "/a/b");
        assert_eq!(found, Some(("/a/b", "c")));
    }

    #[test]
    fn test_trim_trailing_slash() {
        assert_eq!(trim_trailing_slash("/member/list/"), "/member/list");
        assert_eq!(trim_trailing_slash("/member/list"), "/member/list");
        assert_eq!(trim_trailing_slash("/"), "/");
    }
}
