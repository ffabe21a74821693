//! URL canonicalisation for deduplication and domain matching.
//!
//! Dedup keys keep only scheme + host + path: pages differing in query
//! string or fragment compare as equal. This is deliberately cruder than
//! tracking-parameter stripping — search backends decorate result URLs
//! with arbitrary click-through parameters, so the whole query goes.

use url::Url;

/// Normalise a URL for deduplication comparison.
///
/// Keeps scheme, host (with any explicit port) and path; strips the
/// query string and fragment. Input that does not parse as an absolute
/// URL is returned unchanged — this function never fails.
///
/// # Examples
///
/// ```
/// use topic_scout::aggregator::url_normalize::normalize_url;
///
/// let a = normalize_url("https://people.com.cn/a?x=1#y");
/// assert_eq!(a, "https://people.com.cn/a");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);
    parsed.set_query(None);
    parsed.to_string()
}

/// Extract the domain for whitelist/blacklist matching.
///
/// Returns the host with one leading `www.` stripped, or an empty string
/// when the input has no parseable host.
pub fn domain_of(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        return String::new();
    };
    let host = parsed.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(
            normalize_url("https://people.com.cn/a?x=1#y"),
            "https://people.com.cn/a"
        );
    }

    #[test]
    fn same_page_with_different_query_normalises_identically() {
        let a = normalize_url("https://people.com.cn/a?x=1#y");
        let b = normalize_url("https://people.com.cn/a?from=search&x=2");
        assert_eq!(a, b);
    }

    #[test]
    fn keeps_path_untouched() {
        assert_eq!(
            normalize_url("https://news.163.com/24/0101/some-article.html"),
            "https://news.163.com/24/0101/some-article.html"
        );
    }

    #[test]
    fn keeps_explicit_port() {
        assert_eq!(
            normalize_url("http://127.0.0.1:8080/page?q=1"),
            "http://127.0.0.1:8080/page"
        );
    }

    #[test]
    fn invalid_url_returned_unchanged() {
        assert_eq!(normalize_url("not a url at all"), "not a url at all");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn domain_strips_leading_www() {
        assert_eq!(domain_of("https://www.baidu.com/s?wd=x"), "baidu.com");
    }

    #[test]
    fn domain_keeps_inner_www() {
        // Only a leading `www.` is stripped, not one inside the host.
        assert_eq!(domain_of("https://news.www-archive.cn/a"), "news.www-archive.cn");
    }

    #[test]
    fn domain_of_subdomain_preserved() {
        assert_eq!(
            domain_of("https://mp.weixin.qq.com/s/abcdef"),
            "mp.weixin.qq.com"
        );
    }

    #[test]
    fn domain_of_malformed_is_empty() {
        assert_eq!(domain_of("not a url"), "");
        assert_eq!(domain_of(""), "");
    }

    #[test]
    fn domain_of_normalised_url_round_trips() {
        let normalised = normalize_url("https://www.thepaper.cn/newsDetail?contid=1#top");
        assert_eq!(domain_of(&normalised), "thepaper.cn");
    }
}
