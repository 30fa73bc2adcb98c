#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Attachment;
    use crate::domain::errors::ImageEditError;
    use crate::domain::ports::mocks::MockImageSourcePort;

    #[test]
    fn test_extract_single_url() {
        let content = "Check this out https://example.com/pic.jpg cool right?";
        let urls = UrlExtractor::extract_candidate_urls(content);
        assert_eq!(urls, vec!["https://example.com/pic.jpg"]);
    }

    #[test]
    fn test_extension_is_not_required() {
        let content = "http://media.example.org/render?id=12&size=large";
        let urls = UrlExtractor::extract_candidate_urls(content);
        assert_eq!(urls, vec!["http://media.example.org/render?id=12&size=large"]);
    }

    #[test]
    fn test_url_without_path_is_ignored() {
        let urls = UrlExtractor::extract_candidate_urls("see https://example.com and ftp://x.io/a");
        assert!(urls.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let content = "https://a.com/1.png https://b.com/2.png https://a.com/1.png";
        let urls = UrlExtractor::extract_candidate_urls(content);
        assert_eq!(
            urls,
            vec![
                "https://a.com/1.png",
                "https://b.com/2.png",
                "https://a.com/1.png"
            ]
        );
    }

    #[test]
    fn test_host_length_is_bounded() {
        let long_host = "a".repeat(254);
        let content = format!("https://{long_host}/x.png");
        assert!(UrlExtractor::extract_candidate_urls(&content).is_empty());

        let ok_host = "a".repeat(253);
        let content = format!("https://{ok_host}/x.png");
        assert_eq!(UrlExtractor::extract_candidate_urls(&content).len(), 1);
    }

    #[test]
    fn test_path_is_truncated_at_bound() {
        let content = format!("https://a.io/{}", "p".repeat(2000));
        let urls = UrlExtractor::extract_candidate_urls(&content);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].len(), "https://a.io/".len() + 1800);
    }

    #[test]
    fn test_every_match_satisfies_grammar() {
        let content = "junk http://x.y/z\thttps://h/p?q=1 <https://a.b/c> \
                       https:///nohost https://ok.io/a/b/c\nhttp://n.io/";
        let anchored = RegexBuilder::new(r"^https?://[^/\s]{1,253}/\S{1,1800}$")
            .size_limit(64 * (1 << 20))
            .build()
            .unwrap();

        let urls = UrlExtractor::extract_candidate_urls(content);
        assert!(!urls.is_empty());
        for url in &urls {
            assert!(anchored.is_match(url), "{url} does not match");
        }
        let mut last = 0;
        for url in &urls {
            let pos = content[last..].find(url.as_str()).unwrap() + last;
            assert!(pos >= last);
            last = pos + url.len();
        }
    }

    #[test]
    fn test_no_urls() {
        let urls = UrlExtractor::extract_candidate_urls("Just some text with no images.");
        assert!(urls.is_empty());
    }

    fn source_with(responses: Vec<(&'static str, Result<Option<&'static str>, bool>)>) -> Arc<MockImageSourcePort> {
        let mut source = MockImageSourcePort::new();
        source.expect_probe().returning(move |url| {
            match responses.iter().find(|(u, _)| *u == url).map(|(_, r)| *r) {
                Some(Ok(ct)) => Ok(ct.map(String::from)),
                Some(Err(true)) => Err(ImageEditError::probe_refused(url)),
                Some(Err(false)) | None => Err(ImageEditError::fetch(url, "connection refused")),
            }
        });
        Arc::new(source)
    }

    #[tokio::test]
    async fn test_filters_by_content_type() {
        let source = source_with(vec![
            ("https://a.io/cat.png", Ok(Some("image/png"))),
            ("https://a.io/page", Ok(Some("text/html; charset=utf-8"))),
        ]);
        let extractor = ImageReferenceExtractor::new(source);
        let message = ChatMessage::new("https://a.io/page and https://a.io/cat.png");

        let urls = extractor.extract(&message).await;
        assert_eq!(urls, vec!["https://a.io/cat.png"]);
    }

    #[tokio::test]
    async fn test_refused_and_failed_probes_are_excluded() {
        let source = source_with(vec![
            ("https://a.io/refused.png", Err(true)),
            ("https://a.io/down.png", Err(false)),
            ("https://a.io/untyped", Ok(None)),
            ("https://a.io/ok.gif", Ok(Some("IMAGE/GIF"))),
        ]);
        let extractor = ImageReferenceExtractor::new(source);
        let message = ChatMessage::new(
            "https://a.io/refused.png https://a.io/down.png https://a.io/untyped https://a.io/ok.gif",
        );

        let urls = extractor.extract(&message).await;
        assert_eq!(urls, vec!["https://a.io/ok.gif"]);
    }

    #[tokio::test]
    async fn test_text_urls_come_before_attachments() {
        let source = source_with(vec![
            ("https://cdn.chat/att/1.png", Ok(Some("image/png"))),
            ("https://a.io/x.jpg", Ok(Some("image/jpeg"))),
            ("https://a.io/y.webp", Ok(Some("image/webp"))),
        ]);
        let extractor = ImageReferenceExtractor::new(source);
        let message = ChatMessage::new("https://a.io/x.jpg then https://a.io/y.webp")
            .with_attachment(Attachment::new("https://cdn.chat/att/1.png"));

        let urls = extractor.extract(&message).await;
        assert_eq!(
            urls,
            vec![
                "https://a.io/x.jpg",
                "https://a.io/y.webp",
                "https://cdn.chat/att/1.png"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_message_probes_nothing() {
        let mut source = MockImageSourcePort::new();
        source.expect_probe().times(0);
        let extractor = ImageReferenceExtractor::new(Arc::new(source));

        let urls = extractor.extract(&ChatMessage::default()).await;
        assert!(urls.is_empty());
    }
}

use std::sync::{Arc, LazyLock};

use futures_util::future::join_all;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::domain::entities::ChatMessage;
use crate::domain::ports::ImageSourcePort;

const URL_PATTERN: &str = r"https?://(?:[^/\s]{1,253})/(?:\S{1,1800})";

/// Finds URL-shaped substrings in message text.
pub struct UrlExtractor;

impl UrlExtractor {
    /// Returns every URL-shaped substring in first-seen order.
    pub fn extract_candidate_urls(content: &str) -> Vec<String> {
        static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
            RegexBuilder::new(URL_PATTERN)
                .size_limit(64 * (1 << 20))
                .build()
                .unwrap()
        });

        if !content.contains("http") {
            return Vec::new();
        }

        URL_RE
            .find_iter(content)
            .map(|m| m.as_str().to_owned())
            .collect()
    }
}

/// Resolves the image references of a message by probing each candidate.
#[derive(Clone)]
pub struct ImageReferenceExtractor {
    source: Arc<dyn ImageSourcePort>,
}

impl ImageReferenceExtractor {
    /// Creates an extractor probing through `source`.
    #[must_use]
    pub fn new(source: Arc<dyn ImageSourcePort>) -> Self {
        Self { source }
    }

    /// Returns confirmed image URLs: text URLs first, then attachments.
    pub async fn extract(&self, message: &ChatMessage) -> Vec<String> {
        let candidates = UrlExtractor::extract_candidate_urls(message.content());
        let urls: Vec<&str> = candidates
            .iter()
            .map(String::as_str)
            .chain(message.attachment_urls())
            .collect();

        if urls.is_empty() {
            return Vec::new();
        }

        let verdicts = join_all(urls.iter().map(|url| self.is_image(url))).await;

        let images: Vec<String> = urls
            .into_iter()
            .zip(verdicts)
            .filter(|(_, is_image)| *is_image)
            .map(|(url, _)| url.to_owned())
            .collect();

        debug!(
            candidates = candidates.len(),
            attachments = message.attachments().len(),
            images = images.len(),
            "Extracted image references"
        );

        images
    }

    /// Probes a single URL. Never fails: anything unconfirmable is excluded.
    pub async fn is_image(&self, url: &str) -> bool {
        match self.source.probe(url).await {
            Ok(Some(content_type)) => content_type.to_ascii_lowercase().starts_with("image/"),
            Ok(None) => {
                debug!(url = %url, "Probe returned no content type");
                false
            }
            Err(e) if e.is_exclusion() => {
                debug!(url = %url, "Probe refused, excluding");
                false
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Probe failed, excluding");
                false
            }
        }
    }
}
