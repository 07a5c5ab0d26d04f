/// Prefix the server puts in front of in-app link destinations.
pub const VIEW_PREFIX: &str = "/view/";

/// Non-empty slash-delimited segments of a node path.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Path of the parent node; the root's parent is the root (empty path).
pub fn parent_path(path: &str) -> String {
    let segments = path_segments(path);
    match segments.split_last() {
        Some((_, parents)) => parents.join("/"),
        None => String::new(),
    }
}

/// Join a parent path and a child name without doubling separators.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Last path segment, which is also the node's name within its parent.
pub fn path_name(path: &str) -> Option<&str> {
    path_segments(path).last().copied()
}

/// Ancestor paths for each breadcrumb: `a/b/c` yields `a`, `a/b`, `a/b/c`.
pub fn breadcrumb_paths(path: &str) -> Vec<(String, String)> {
    let segments = path_segments(path);
    (0..segments.len())
        .map(|i| (segments[i].to_string(), segments[..=i].join("/")))
        .collect()
}

/// Normalise an in-app link destination to a node path.
pub fn view_path(destination: &str) -> String {
    destination
        .strip_prefix(VIEW_PREFIX)
        .unwrap_or(destination)
        .trim_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("a/b/c"), "a/b");
        assert_eq!(parent_path("a"), "");
        assert_eq!(parent_path(""), "");
        assert_eq!(parent_path("a/b/"), "a");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("board/todo", "card"), "board/todo/card");
        assert_eq!(join_path("board/todo/", "/card"), "board/todo/card");
        assert_eq!(join_path("", "card"), "card");
    }

    #[test]
    fn test_breadcrumb_paths() {
        let crumbs = breadcrumb_paths("a/b/c");
        assert_eq!(
            crumbs,
            vec![
                ("a".to_string(), "a".to_string()),
                ("b".to_string(), "a/b".to_string()),
                ("c".to_string(), "a/b/c".to_string()),
            ]
        );
        assert!(breadcrumb_paths("").is_empty());
    }

    #[test]
    fn test_view_path_strips_prefix() {
        assert_eq!(view_path("/view/notes/rust"), "notes/rust");
        assert_eq!(view_path("notes/rust/"), "notes/rust");
        assert_eq!(path_name("notes/rust"), Some("rust"));
    }
}
