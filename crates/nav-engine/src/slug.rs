//! URL slugs derived from titles

/// Lowercase `text`, keep alphanumerics, collapse everything else into
/// single separators, trim separators at both ends.
#[must_use]
pub fn slugify(text: &str, separator: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Join a resolved parent path and a relative segment with one `/`
#[must_use]
pub fn join_path(parent: &str, segment: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let segment = segment.trim_matches('/');
    if segment.is_empty() {
        if parent.is_empty() {
            "/".to_string()
        } else {
            parent.to_string()
        }
    } else {
        format!("{parent}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("About Us", '-'), "about-us");
        assert_eq!(slugify("  News & Events!  ", '-'), "news-events");
        assert_eq!(slugify("a__b--c", '_'), "a_b_c");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Über Größe", '-'), "über-größe");
        assert_eq!(slugify("!!!", '-'), "");
    }

    #[test]
    fn join_path_normalizes_slashes() {
        assert_eq!(join_path("", "about"), "/about");
        assert_eq!(join_path("/about/", "/team/"), "/about/team");
        assert_eq!(join_path("/about", ""), "/about");
        assert_eq!(join_path("", ""), "/");
    }
}
