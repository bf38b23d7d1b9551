//! Href resolution for documentation pages
//!
//! Anchors are resolved against the page that contains them and expressed
//! relative to the documentation root, using `/` separators regardless of
//! platform since the result is a URL path inside the docset.

/// Hrefs starting with one of these are navigation links, not content
pub const FILTERED_HREFS: &[&str] = &["index.html"];

/// Whether an href should be indexed at all
pub fn is_valid_href(href: &str, filtered: &[&str]) -> bool {
    if href.is_empty() || href.starts_with('/') || href.contains("://") {
        return false;
    }
    !filtered.iter().any(|prefix| href.starts_with(prefix))
}

/// Resolve `href` found on `page` (both relative to the documentation root).
///
/// Returns `None` for filtered or external hrefs.
pub fn resolve_href(page: &str, href: &str, filtered: &[&str]) -> Option<String> {
    if !is_valid_href(href, filtered) {
        return None;
    }

    let (target, fragment) = match href.find('#') {
        Some(0) => (page.to_string(), href),
        Some(i) => (join(page_dir(page), &href[..i]), &href[i..]),
        None => (join(page_dir(page), href), ""),
    };

    let normalized = normalize(&target);
    if normalized.is_empty() {
        return None;
    }
    Some(format!("{normalized}{fragment}"))
}

fn page_dir(page: &str) -> &str {
    match page.rfind('/') {
        Some(i) => &page[..i],
        None => "",
    }
}

fn join(dir: &str, path: &str) -> String {
    if dir.is_empty() {
        path.to_string()
    } else {
        format!("{dir}/{path}")
    }
}

/// Fold `.` and `..` segments. Leading `..` that escape the root are kept.
fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(page: &str, href: &str) -> Option<String> {
        resolve_href(page, href, FILTERED_HREFS)
    }

    #[test]
    fn test_fragment_resolves_against_page() {
        assert_eq!(resolve("Guide.html", "#section").as_deref(), Some("Guide.html#section"));
        assert_eq!(
            resolve("tutorial/index.html", "#chapter-1").as_deref(),
            Some("tutorial/index.html#chapter-1")
        );
    }

    #[test]
    fn test_parent_segments_are_folded() {
        assert_eq!(resolve("sub/Guide.html", "../Other.html").as_deref(), Some("Other.html"));
        assert_eq!(
            resolve("CommandGuide/index.html", "llvm-as.html").as_deref(),
            Some("CommandGuide/llvm-as.html")
        );
        assert_eq!(
            resolve("a/b/Page.html", "./../c/./Doc.html#x").as_deref(),
            Some("a/c/Doc.html#x")
        );
    }

    #[test]
    fn test_fragment_is_not_normalized() {
        assert_eq!(
            resolve("sub/Page.html", "../Other.html#a/../b").as_deref(),
            Some("Other.html#a/../b")
        );
    }

    #[test]
    fn test_escaping_root_keeps_parent_segment() {
        assert_eq!(resolve("Page.html", "../outside.html").as_deref(), Some("../outside.html"));
    }

    #[test]
    fn test_index_page_is_filtered() {
        assert_eq!(resolve("Guide.html", "index.html"), None);
        assert_eq!(resolve("Guide.html", "index.html#top"), None);
        assert!(!is_valid_href("index.html", FILTERED_HREFS));
    }

    #[test]
    fn test_external_and_empty_hrefs_are_skipped() {
        assert_eq!(resolve("Guide.html", ""), None);
        assert_eq!(resolve("Guide.html", "https://llvm.org/"), None);
        assert_eq!(resolve("Guide.html", "/abs.html"), None);
        assert_eq!(resolve("sub/Guide.html", ".."), None);
    }
}
