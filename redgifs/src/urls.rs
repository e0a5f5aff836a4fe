//! Helpers around RedGifs media URLs

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use url::{Url, form_urlencoded};

const WEB_BASE_URL: &str = "https://redgifs.com/watch";
const FILES_BASE_URL: &str = "https://api.redgifs.com/v2/gifs";

/// Thumbnail URL: `https://thumbs<n>.redgifs.com/<id>[-<variant>].<ext>`
static THUMBS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://thumbs\d+\.redgifs\.com/(?P<id>\w+)(-\w+)?\.(?P<ext>\w+)")
        .unwrap_or_else(|e| panic!("BUG: invalid thumbs regex: {}", e))
});

/// Web page of a media
pub fn to_web_url(id: &str) -> String {
    format!("{}/{}", WEB_BASE_URL, id.to_lowercase())
}

/// Web page of the media shown by a thumbnail URL
///
/// `https://thumbs2.redgifs.com/WatchfulWaryIbisbill-mobile.mp4` gives
/// `https://redgifs.com/watch/watchfulwaryibisbill`. Returns `None` for
/// anything that is not a thumbnail URL.
pub fn thumbs_to_web_url(url: &str) -> Option<String> {
    THUMBS_RE
        .captures(url)
        .and_then(|caps| caps.name("id"))
        .map(|id| to_web_url(id.as_str()))
}

/// Direct file URL built from the `sd` URL of a GIF
///
/// `https://thumbs4.redgifs.com/WatchfulWaryIbisbill-mobile.mp4?expires=1`
/// gives `https://api.redgifs.com/v2/gifs/watchfulwaryibisbill/files/WatchfulWaryIbisbill.mp4`.
pub fn build_file_url(sd_url: &str) -> Result<String> {
    let url = Url::parse(sd_url)?;
    let filename = url.path().replace('/', "").replace("-mobile.mp4", "");
    Ok(format!(
        "{}/{}/files/{}.mp4",
        FILES_BASE_URL,
        filename.to_lowercase(),
        filename
    ))
}

/// Hides the client IP carried by the `for` query parameter of signed URLs
///
/// Only the `for` value is rewritten; the other parameters are kept as
/// they were encoded, since they are covered by the signature. Anything
/// that does not parse as a URL, or has no `for` value, is returned
/// unchanged.
pub fn strip_ip(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let has_ip = parsed.query_pairs().any(|(k, v)| k == "for" && !v.is_empty());
    if !has_ip {
        return url.to_string();
    }

    let query = parsed
        .query()
        .unwrap_or_default()
        .split('&')
        .map(|pair| {
            let is_for = form_urlencoded::parse(pair.as_bytes())
                .next()
                .is_some_and(|(k, _)| k == "for");
            if is_for { "for=REDACTED" } else { pair }
        })
        .collect::<Vec<_>>()
        .join("&");
    parsed.set_query(Some(&query));
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_web_url() {
        assert_eq!(
            to_web_url("WatchfulWaryIbisbill"),
            "https://redgifs.com/watch/watchfulwaryibisbill"
        );
    }

    #[test]
    fn test_thumbs_to_web_url() {
        assert_eq!(
            thumbs_to_web_url("https://thumbs2.redgifs.com/WatchfulWaryIbisbill-mobile.mp4").as_deref(),
            Some("https://redgifs.com/watch/watchfulwaryibisbill")
        );
        assert_eq!(
            thumbs_to_web_url("https://thumbs44.redgifs.com/WatchfulWaryIbisbill.jpg?expires=1").as_deref(),
            Some("https://redgifs.com/watch/watchfulwaryibisbill")
        );
        assert_eq!(thumbs_to_web_url("WatchfulWaryIbisbill"), None);
        assert_eq!(thumbs_to_web_url("https://redgifs.com/watch/watchfulwaryibisbill"), None);
        assert_eq!(thumbs_to_web_url("see https://thumbs2.redgifs.com/A-mobile.mp4"), None);
    }

    #[test]
    fn test_build_file_url() {
        let url = build_file_url(
            "https://thumbs44.redgifs.com/WatchfulWaryIbisbill-mobile.mp4?expires=1700000000&signature=abc",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://api.redgifs.com/v2/gifs/watchfulwaryibisbill/files/WatchfulWaryIbisbill.mp4"
        );
        assert!(build_file_url("no scheme here").is_err());
    }

    #[test]
    fn test_strip_ip() {
        let stripped = strip_ip("https://thumbs44.redgifs.com/A.mp4?expires=1&for=203.0.113.7&sig=x");
        assert!(stripped.contains("for=REDACTED"));
        assert!(stripped.contains("expires=1"));
        assert!(stripped.contains("sig=x"));
        assert!(!stripped.contains("203.0.113.7"));
    }

    #[test]
    fn test_strip_ip_keeps_other_parameters_encoded() {
        let stripped = strip_ip(
            "https://thumbs44.redgifs.com/A.mp4?name=a%20b&sig=x%2By+z&for=203.0.113.7&expires=1",
        );
        assert_eq!(
            stripped,
            "https://thumbs44.redgifs.com/A.mp4?name=a%20b&sig=x%2By+z&for=REDACTED&expires=1"
        );
    }

    #[test]
    fn test_strip_ip_leaves_other_urls_alone() {
        let url = "https://thumbs44.redgifs.com/A.mp4?expires=1";
        assert_eq!(strip_ip(url), url);
        assert_eq!(strip_ip("not a url"), "not a url");
    }
}
