//! Grounding content: fetch a page and reduce it to a bounded text excerpt.
//!
//! Acquisition is best effort. [`ContentAcquirer::grounding`] logs failures
//! and hands back `None` so the pipeline carries on without source material.

use crate::error::AcquireError;
use regex::Regex;
use reqwest::blocking::Client;
use std::sync::OnceLock;
use std::time::Duration;

const USER_AGENT: &str = concat!("lessons/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// ContentSource
// ---------------------------------------------------------------------------

/// Where raw page markup comes from.
pub trait ContentSource {
    fn fetch_html(&self, url: &str) -> Result<String, AcquireError>;
}

/// Plain blocking HTTP GET. Non-2xx statuses are errors.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, AcquireError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl ContentSource for HttpSource {
    fn fetch_html(&self, url: &str) -> Result<String, AcquireError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

// ---------------------------------------------------------------------------
// ContentAcquirer
// ---------------------------------------------------------------------------

pub struct ContentAcquirer<'a> {
    source: &'a dyn ContentSource,
    max_chars: usize,
}

impl<'a> ContentAcquirer<'a> {
    pub fn new(source: &'a dyn ContentSource, max_chars: usize) -> Self {
        Self { source, max_chars }
    }

    /// Fetch `url` and return at most `max_chars` characters of its text.
    pub fn excerpt(&self, url: &str) -> Result<String, AcquireError> {
        let html = self.source.fetch_html(url)?;
        let text = extract_text(&html);
        if text.is_empty() {
            return Err(AcquireError::NoText(url.to_string()));
        }
        Ok(truncate_chars(&text, self.max_chars).to_string())
    }

    /// Like [`excerpt`](Self::excerpt), but failures become `None`.
    pub fn grounding(&self, url: Option<&str>) -> Option<String> {
        let url = url?;
        tracing::info!(%url, "fetching grounding content");
        match self.excerpt(url) {
            Ok(text) => {
                tracing::debug!(chars = text.chars().count(), "grounding content acquired");
                Some(text)
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "could not acquire grounding content; continuing without it");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

static REGION_RES: OnceLock<[Regex; 3]> = OnceLock::new();
static NOISE_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// `<article>`, then `<main>`, then `<body>`: the first one present wins.
fn region_res() -> &'static [Regex; 3] {
    REGION_RES.get_or_init(|| {
        ["article", "main", "body"]
            .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>(.*?)</{tag}\s*>")).unwrap())
    })
}

fn noise_re() -> &'static Regex {
    NOISE_RE.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<noscript\b[^>]*>.*?</noscript\s*>")
            .unwrap()
    })
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap())
}

/// Visible text of the main content region, one text run per line.
pub fn extract_text(html: &str) -> String {
    let region = region_res()
        .iter()
        .find_map(|re| re.captures(html).and_then(|c| c.get(1)))
        .map_or(html, |m| m.as_str());

    let without_noise = noise_re().replace_all(region, "\n");
    let without_tags = tag_re().replace_all(&without_noise, "\n");
    let decoded = html_escape::decode_html_entities(&without_tags);

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The first `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Option<&'static str>);

    impl ContentSource for FixedSource {
        fn fetch_html(&self, url: &str) -> Result<String, AcquireError> {
            self.0
                .map(str::to_owned)
                .ok_or_else(|| AcquireError::NoText(url.to_string()))
        }
    }

    #[test]
    fn prefers_article_over_body() {
        let html = "<html><body><nav>Home | Docs</nav><article><h1>Volumes</h1><p>Data &amp; state.</p></article><footer>(c)</footer></body></html>";
        assert_eq!(extract_text(html), "Volumes\nData & state.");
    }

    #[test]
    fn falls_back_to_main_then_body() {
        let html = "<body><header>Site</header><main><p>Main text</p></main></body>";
        assert_eq!(extract_text(html), "Main text");
        let html = "<html><head><title>T</title></head><BODY class=\"x\"><p>Body text</p></BODY></html>";
        assert_eq!(extract_text(html), "Body text");
    }

    #[test]
    fn drops_scripts_styles_and_comments() {
        let html = "<body><script>var a = '<p>no</p>';</script><style>p{}</style><!-- hidden --><p>Shown</p></body>";
        assert_eq!(extract_text(html), "Shown");
    }

    #[test]
    fn fragment_without_body_uses_everything() {
        assert_eq!(extract_text("<p>one</p>\n  <p>two</p>"), "one\ntwo");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn excerpt_is_bounded() {
        let source = FixedSource(Some("<article><p>abcdefghij</p></article>"));
        let acquirer = ContentAcquirer::new(&source, 4);
        assert_eq!(acquirer.excerpt("https://example.com").unwrap(), "abcd");
    }

    #[test]
    fn grounding_swallows_failures() {
        let source = FixedSource(None);
        let acquirer = ContentAcquirer::new(&source, 100);
        assert_eq!(acquirer.grounding(Some("https://example.com")), None);
        assert_eq!(acquirer.grounding(None), None);
    }

    #[test]
    fn empty_page_is_no_text() {
        let source = FixedSource(Some("<body>   </body>"));
        let acquirer = ContentAcquirer::new(&source, 100);
        assert!(matches!(
            acquirer.excerpt("https://example.com"),
            Err(AcquireError::NoText(_))
        ));
    }

    #[test]
    fn http_source_fetches_and_rejects_errors() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/docs")
            .with_status(200)
            .with_body("<main><p>Hello docs</p></main>")
            .create();
        server.mock("GET", "/missing").with_status(404).create();

        let source = HttpSource::new(Duration::from_secs(5)).unwrap();
        let acquirer = ContentAcquirer::new(&source, 1000);
        assert_eq!(
            acquirer.excerpt(&format!("{}/docs", server.url())).unwrap(),
            "Hello docs"
        );
        assert!(matches!(
            acquirer.excerpt(&format!("{}/missing", server.url())),
            Err(AcquireError::Http(_))
        ));
    }
}
