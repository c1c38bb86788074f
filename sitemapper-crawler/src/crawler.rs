use crate::error::{CrawlError, FetchError};
use crate::extract::extract_page_links;
use crate::url::CrawlUrl;
use futures::future::BoxFuture;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_MAX_SEARCH_DEPTH: usize = 1;
const USER_AGENT: &str = "sitemapper/0.1";

/// Depth-bounded, cycle-safe site map builder.
///
/// The traversal is depth-first and strictly sequential: each page fetch
/// is awaited to completion before the next one starts. A fetch failure
/// is confined to its page - the failing address is recorded with a
/// one-line diagnostic and the traversal continues with siblings.
///
/// All traversal state (visited set, output buffer) is local to one
/// [`create_site_map`](Crawler::create_site_map) call, so overlapping
/// calls on the same instance are safe.
pub struct Crawler {
    client: Client,
    max_search_depth: usize,
}

impl Crawler {
    /// `page_timeout_ms` bounds each individual page fetch; there is no
    /// overall run deadline.
    pub fn new(page_timeout_ms: u64) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(page_timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_search_depth: DEFAULT_MAX_SEARCH_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_search_depth = depth;
        self
    }

    /// Builds the site map text for `base_url`: one URL or diagnostic per
    /// line, in traversal order. A missing scheme is defaulted to
    /// `http://`. The only fatal error is an empty base URL; every
    /// per-page failure shows up as a diagnostic line instead.
    pub async fn create_site_map(&self, base_url: &str) -> Result<String, CrawlError> {
        if base_url.trim().is_empty() {
            return Err(CrawlError::EmptyBaseUrl);
        }

        let root = CrawlUrl::crawlable(add_protocol_to_url(base_url));
        let mut visited = HashSet::new();
        let mut site_map = String::new();

        self.visit(root, 0, &mut visited, &mut site_map).await;

        Ok(site_map)
    }

    /// One node of the traversal. Boxed because async fns cannot recurse
    /// unboxed; the recursion is still plain sequential depth-first.
    ///
    /// The depth check comes after the visited check but before the
    /// visited-set insertion, so a node rejected for depth stays
    /// unvisited and can still be reached later through a shallower path.
    fn visit<'a>(
        &'a self,
        url: CrawlUrl,
        depth: usize,
        visited: &'a mut HashSet<String>,
        site_map: &'a mut String,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let address = url.address().to_string();

            if visited.contains(&address) {
                return;
            }
            if depth > self.max_search_depth {
                return;
            }

            info!("[{}] {}", depth, address);
            visited.insert(address.clone());

            let body = match self.fetch_page(&address).await {
                Ok(body) => body,
                Err(err) => {
                    warn!("{} - {}", address, err);
                    site_map.push_str(&format!("{address} - {err}\n"));
                    return;
                }
            };

            let links = extract_page_links(&address, &body);

            site_map.push_str(&address);
            site_map.push('\n');
            flatten_into(site_map, &links.stylesheets);
            flatten_into(site_map, &links.scripts);
            flatten_into(site_map, &links.images);

            for child in links.children.iter().filter(|c| c.is_crawlable()) {
                self.visit(child.clone(), depth + 1, visited, site_map)
                    .await;
            }

            // external links go last, after every crawlable child has
            // been fully traversed
            let externals: Vec<CrawlUrl> = links
                .children
                .iter()
                .filter(|c| !c.is_crawlable())
                .cloned()
                .collect();
            flatten_into(site_map, &externals);
        })
    }

    async fn fetch_page(&self, address: &str) -> Result<String, FetchError> {
        let response = self.client.get(address).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

fn add_protocol_to_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!("http://{url}")
}

/// Appends a list of URLs to the buffer: addresses joined by `\n` with
/// one trailing `\n`. An empty list contributes nothing.
fn flatten_into(site_map: &mut String, urls: &[CrawlUrl]) {
    if urls.is_empty() {
        return;
    }
    let block = urls
        .iter()
        .map(|url| url.address())
        .collect::<Vec<_>>()
        .join("\n");
    site_map.push_str(&block);
    site_map.push('\n');
}
