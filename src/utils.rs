use url::Url;

/// Archive-root URL for one calendar year
pub fn archive_url(host: &str, year: i32) -> String {
    format!("{}/{}/", host.trim_end_matches('/'), year)
}

/// Resolve a possibly relative `href` against the page it was found on
///
/// Falls back to the raw value when either side is not a usable URL.
pub fn resolve_href(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_url() {
        assert_eq!(
            archive_url("https://www.nfcw.com", 2024),
            "https://www.nfcw.com/2024/"
        );
        assert_eq!(
            archive_url("https://www.nfcw.com/", 1999),
            "https://www.nfcw.com/1999/"
        );
    }

    #[test]
    fn test_resolve_href() {
        let base = "https://www.nfcw.com/2024/page/2/";
        assert_eq!(
            resolve_href(base, "/2024/01/02/story/"),
            "https://www.nfcw.com/2024/01/02/story/"
        );
        assert_eq!(
            resolve_href(base, "https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(resolve_href("not a url", "/x"), "/x");
    }
}
