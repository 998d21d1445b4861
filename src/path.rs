//! Dotted path helpers shared by the walker, populator and resolver.

/// Join a prefix and a segment with `.`, or return the segment alone when
/// the prefix is empty.
pub fn dotted(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Strip a section prefix from a full path.
///
/// `strip_section("plugin", "plugin.port")` is `Some("port")`. An empty section
/// matches every path. A path equal to the section itself, or outside it,
/// yields `None`.
pub fn strip_section<'a>(section: &str, path: &'a str) -> Option<&'a str> {
    if section.is_empty() {
        return Some(path);
    }
    path.strip_prefix(section)?.strip_prefix('.')
}

/// Parent sections of a path, outermost first: `"a.b.c"` gives `["a", "a.b"]`.
pub fn parent_sections(path: &str) -> Vec<&str> {
    path.match_indices('.').map(|(i, _)| &path[..i]).collect()
}
