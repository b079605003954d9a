//! Web research stage: fetch a search engine's HTML results page and extract
//! structured findings from it.
//!
//! Research is built on DuckDuckGo's HTML-only interface, which needs no
//! JavaScript and no API key. The stage never fails upward: broken markup
//! degrades to fewer findings, and fewer than [`MIN_FINDINGS`] findings is
//! topped up with the canned fallback set.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::errors::{Endpoint, PipelineError};
use crate::models::Finding;

/// Research never returns fewer findings than this.
pub const MIN_FINDINGS: usize = 2;

/// Source label used when a URL yields no usable hostname.
const GENERIC_SOURCE: &str = "Internet";

/// Seam over "fetch the raw results markup for a query" so the scraping
/// target can be swapped or mocked without touching extraction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HtmlResultSource: Send + Sync {
    async fn fetch_results_page(&self, query: &str) -> Result<String, PipelineError>;
}

/// Client for the DuckDuckGo HTML endpoint.
///
/// The endpoint expects a form POST with the query in `q` and serves plain
/// HTML. A browser user agent keeps it from answering with a bot challenge.
pub struct DuckDuckGoSource {
    http: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoSource {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl HtmlResultSource for DuckDuckGoSource {
    async fn fetch_results_page(&self, query: &str) -> Result<String, PipelineError> {
        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| PipelineError::network(Endpoint::Search, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Upstream {
                endpoint: Endpoint::Search,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PipelineError::network(Endpoint::Search, e))
    }
}

/// Research pipeline stage: fetch, extract, top up with fallbacks.
#[derive(Clone)]
pub struct ResearchService {
    source: Arc<dyn HtmlResultSource>,
    limit: usize,
}

impl ResearchService {
    pub fn new(source: Arc<dyn HtmlResultSource>, limit: usize) -> Self {
        Self { source, limit }
    }

    /// Run one research pass for a query.
    ///
    /// Infallible by contract: fetch or parse trouble is logged and degrades
    /// to the fallback findings instead of surfacing.
    pub async fn run(&self, query: &str) -> Vec<Finding> {
        let mut findings = match self.source.fetch_results_page(query).await {
            Ok(html) => match extract_findings(&html, self.limit) {
                Ok(findings) => findings,
                Err(err) => {
                    warn!(error = %err, query, "result extraction failed");
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(error = %err, query, "search fetch failed, serving fallback findings");
                Vec::new()
            }
        };

        if findings.len() < MIN_FINDINGS {
            let offset = findings.len() as u32;
            findings.extend(fallback_findings(query, offset));
        }

        debug!(count = findings.len(), query, "research complete");
        findings
    }
}

/// Parse a results page into at most `limit` findings, in document order.
///
/// DuckDuckGo keeps each hit in a `.result` block with the title link in
/// `.result__a` and the description in `.result__snippet`. Blocks missing a
/// title, snippet, or href are skipped rather than padded.
fn extract_findings(html: &str, limit: usize) -> Result<Vec<Finding>> {
    let document = Html::parse_document(html);

    let result_selector =
        Selector::parse(".result").map_err(|e| anyhow!("invalid result selector: {e:?}"))?;
    let title_selector =
        Selector::parse(".result__a").map_err(|e| anyhow!("invalid title selector: {e:?}"))?;
    let snippet_selector = Selector::parse(".result__snippet")
        .map_err(|e| anyhow!("invalid snippet selector: {e:?}"))?;

    let mut findings = Vec::new();

    for block in document.select(&result_selector) {
        if findings.len() >= limit {
            break;
        }

        let Some(link) = block.select(&title_selector).next() else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        let snippet = block
            .select(&snippet_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        if title.is_empty() || snippet.is_empty() {
            continue;
        }

        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let url = unwrap_redirect(href);
        let source = source_label(&url);

        findings.push(Finding {
            id: findings.len() as u32 + 1,
            title,
            snippet,
            url,
            source,
        });
    }

    Ok(findings)
}

/// DuckDuckGo wraps result URLs in redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=...`.
/// Extract and percent-decode the real destination; hrefs without the
/// parameter pass through unchanged.
fn unwrap_redirect(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + "uddg=".len();
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        if let Ok(decoded) = urlencoding::decode(&href[start..end]) {
            if !decoded.is_empty() {
                return decoded.into_owned();
            }
        }
    }
    href.to_string()
}

/// Derive the display source for a finding: the hostname without a leading
/// `www.`, or a generic label when the URL is relative, the `#` sentinel, or
/// unparseable.
fn source_label(url_text: &str) -> String {
    url::Url::parse(url_text)
        .ok()
        .and_then(|parsed| {
            parsed
                .host_str()
                .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
        })
        .unwrap_or_else(|| GENERIC_SOURCE.to_string())
}

/// Canned findings served when live search produced fewer than
/// [`MIN_FINDINGS`] usable results, worded as analysis and strategy prompts
/// around the original query.
fn fallback_findings(query: &str, id_offset: u32) -> Vec<Finding> {
    vec![
        Finding {
            id: id_offset + 1,
            title: format!("Análisis de oportunidad: {}", query),
            snippet: format!(
                "No encontramos resultados directos para \"{}\". Explora nichos adyacentes, necesidades no cubiertas y tendencias emergentes alrededor del tema.",
                query
            ),
            url: "#".to_string(),
            source: "Análisis IA".to_string(),
        },
        Finding {
            id: id_offset + 2,
            title: "Estrategia de diferenciación".to_string(),
            snippet: format!(
                "Un mercado sin resultados visibles para \"{}\" puede ser una oportunidad: define el problema, valida con usuarios reales y construye un prototipo mínimo.",
                query
            ),
            url: "#".to_string(),
            source: "Estrategia".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE_RESULTS: &str = r##"
    <html><body><div class="serp__results">
      <div class="result results_links web-result">
        <h2 class="result__title">
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.example.com%2Fbottle&amp;rut=abc123">Smart bottle review</a>
        </h2>
        <a class="result__snippet" href="#">Tracks hydration with embedded sensors</a>
      </div>
      <div class="result results_links web-result">
        <h2 class="result__title">
          <a class="result__a" href="https://news.site.org/post">Hydration tech roundup</a>
        </h2>
        <a class="result__snippet" href="#">The latest in connected drinkware</a>
      </div>
      <div class="result results_links web-result">
        <h2 class="result__title">
          <a class="result__a" href="https://nosnippet.example.com/page">Result without snippet</a>
        </h2>
      </div>
      <div class="result result--ad">
        <span class="result__snippet">Sponsored text without a title link</span>
      </div>
      <div class="result results_links web-result">
        <h2 class="result__title">
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fblog.example.net%2Fx&amp;rut=def456">Buying guide</a>
        </h2>
        <a class="result__snippet" href="#">Choosing a bottle that fits your routine</a>
      </div>
    </div></body></html>
    "##;

    fn results_page(count: usize) -> String {
        let blocks: String = (0..count)
            .map(|i| {
                format!(
                    r##"<div class="result"><a class="result__a" href="https://site{i}.example.com/page">Title {i}</a><a class="result__snippet" href="#">Snippet {i}</a></div>"##
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", blocks)
    }

    #[test]
    fn extracts_usable_blocks_in_document_order() {
        let findings = extract_findings(SAMPLE_RESULTS, 6).unwrap();

        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].title, "Smart bottle review");
        assert_eq!(findings[0].snippet, "Tracks hydration with embedded sensors");
        assert_eq!(findings[0].url, "https://www.example.com/bottle");
        assert_eq!(findings[0].source, "example.com");
        assert_eq!(findings[1].url, "https://news.site.org/post");
        assert_eq!(findings[1].source, "news.site.org");
        assert_eq!(findings[2].url, "https://blog.example.net/x");
        assert_eq!(
            findings.iter().map(|f| f.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn respects_the_result_limit() {
        let findings = extract_findings(&results_page(9), 6).unwrap();

        assert_eq!(findings.len(), 6);
        assert_eq!(findings[5].title, "Title 5");
    }

    #[test]
    fn empty_page_extracts_nothing() {
        let findings = extract_findings("<html><body></body></html>", 6).unwrap();
        assert!(findings.is_empty());
    }

    #[rstest]
    #[case(
        "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%20b&rut=xyz",
        "https://example.com/a b"
    )]
    #[case("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com", "https://example.com")]
    #[case("https://direct.example.com/page", "https://direct.example.com/page")]
    #[case("/html/?q=relative", "/html/?q=relative")]
    fn unwraps_redirects(#[case] href: &str, #[case] expected: &str) {
        assert_eq!(unwrap_redirect(href), expected);
    }

    #[rstest]
    #[case("https://www.example.com/page", "example.com")]
    #[case("https://docs.example.org/guide", "docs.example.org")]
    #[case("#", "Internet")]
    #[case("/relative/path", "Internet")]
    #[case("not a url at all", "Internet")]
    fn derives_source_labels(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(source_label(url), expected);
    }

    #[tokio::test]
    async fn fetch_failure_serves_the_fallback_pair() {
        let mut source = MockHtmlResultSource::new();
        source.expect_fetch_results_page().returning(|_| {
            Err(PipelineError::Network {
                endpoint: Endpoint::Search,
                message: "connection refused".to_string(),
            })
        });
        let service = ResearchService::new(Arc::new(source), 6);

        let findings = service.run("underwater drones").await;

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].source, "Análisis IA");
        assert!(findings[0].title.contains("underwater drones"));
        assert_eq!(findings[1].source, "Estrategia");
        assert!(findings.iter().all(|f| f.url == "#"));
        assert_eq!(
            findings.iter().map(|f| f.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn empty_results_page_serves_the_fallback_pair() {
        let mut source = MockHtmlResultSource::new();
        source
            .expect_fetch_results_page()
            .returning(|_| Ok("<html><body>no results here</body></html>".to_string()));
        let service = ResearchService::new(Arc::new(source), 6);

        let findings = service.run("quantum gardening").await;

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].source, "Análisis IA");
        assert_eq!(findings[1].source, "Estrategia");
    }

    #[tokio::test]
    async fn single_genuine_finding_is_topped_up_with_fallbacks() {
        let mut source = MockHtmlResultSource::new();
        source
            .expect_fetch_results_page()
            .returning(|_| Ok(results_page(1)));
        let service = ResearchService::new(Arc::new(source), 6);

        let findings = service.run("niche market").await;

        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].title, "Title 0");
        assert_eq!(findings[1].source, "Análisis IA");
        assert_eq!(findings[2].source, "Estrategia");
        assert_eq!(
            findings.iter().map(|f| f.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn rich_results_page_yields_at_most_the_limit() {
        let mut source = MockHtmlResultSource::new();
        source
            .expect_fetch_results_page()
            .returning(|_| Ok(results_page(9)));
        let service = ResearchService::new(Arc::new(source), 6);

        let findings = service.run("smart water bottle").await;

        assert_eq!(findings.len(), 6);
        assert!(findings.iter().all(|f| f.url != "#"));
        assert!(findings.iter().all(|f| !f.snippet.is_empty()));
    }

    #[tokio::test]
    async fn three_valid_blocks_yield_three_findings_in_order() {
        let mut source = MockHtmlResultSource::new();
        source
            .expect_fetch_results_page()
            .returning(|_| Ok(results_page(3)));
        let service = ResearchService::new(Arc::new(source), 6);

        let findings = service.run("smart water bottle").await;

        assert_eq!(findings.len(), 3);
        assert_eq!(
            findings.iter().map(|f| f.title.as_str()).collect::<Vec<_>>(),
            vec!["Title 0", "Title 1", "Title 2"]
        );
        assert!(findings.iter().all(|f| f.url != "#"));
        assert!(findings.iter().all(|f| !f.title.is_empty() && !f.snippet.is_empty()));
    }

    #[tokio::test]
    async fn query_is_forwarded_to_the_source() {
        let mut source = MockHtmlResultSource::new();
        source
            .expect_fetch_results_page()
            .withf(|query| query == "solar sails")
            .times(1)
            .returning(|_| Ok(results_page(3)));
        let service = ResearchService::new(Arc::new(source), 6);

        let findings = service.run("solar sails").await;
        assert_eq!(findings.len(), 3);
    }
}
