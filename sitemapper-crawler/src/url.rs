use std::fmt;
use url::Url;

/// A URL discovered during a crawl, tagged with whether it belongs to the
/// site being crawled. Crawlable URLs are fetched and recursed into;
/// everything else is only listed in the site map.
#[derive(Debug, Clone, Eq)]
pub struct CrawlUrl {
    address: String,
    crawlable: bool,
}

impl CrawlUrl {
    pub fn crawlable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            crawlable: true,
        }
    }

    pub fn not_crawlable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            crawlable: false,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_crawlable(&self) -> bool {
        self.crawlable
    }
}

// Identity is the address alone.
impl PartialEq for CrawlUrl {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl fmt::Display for CrawlUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Resolves a raw link string found on `page_url` into an absolute,
/// classified URL. Classification is purely string-shape based: fetching
/// a link to find out whether it leaves the site would be wasteful and
/// would leak traffic to third-party hosts.
///
/// Resolution rules, tried in order:
/// 1. starts with the site root -> crawlable, unchanged
/// 2. starts with `http://`, `https://` or `www.` -> external, unchanged
/// 3. starts with `//` (protocol-relative) -> crawlable, scheme prepended
/// 4. starts with `/` (root-relative) -> crawlable, site root prepended
/// 5. anything else (page-relative) -> crawlable, appended to the page URL
///
/// Page-relative resolution is plain concatenation: no `..` normalization
/// and no separating slash is inserted when the page URL lacks one.
/// If `page_url` itself does not parse, the child is recorded as an
/// external placeholder carrying a malformed-url marker.
pub fn resolve_child_url(page_url: &str, child_url: &str) -> CrawlUrl {
    let parsed = match Url::parse(page_url) {
        Ok(parsed) => parsed,
        Err(_) => return CrawlUrl::not_crawlable(format!("{page_url} - malformed url")),
    };
    let site_root = site_root(&parsed);

    if child_url.starts_with(&site_root) {
        CrawlUrl::crawlable(child_url)
    } else if child_url.starts_with("http://")
        || child_url.starts_with("https://")
        || child_url.starts_with("www.")
    {
        CrawlUrl::not_crawlable(child_url)
    } else if child_url.starts_with("//") {
        CrawlUrl::crawlable(format!("{}:{}", parsed.scheme(), child_url))
    } else if child_url.starts_with('/') {
        CrawlUrl::crawlable(format!("{site_root}{child_url}"))
    } else {
        CrawlUrl::crawlable(format!("{page_url}{child_url}"))
    }
}

/// Scheme + host of a page URL, keeping an explicit port only when it is
/// not 80 or 443. `Url` already drops the scheme-default port, so the
/// check only sees ports that were spelled out.
fn site_root(page_url: &Url) -> String {
    let mut root = format!(
        "{}://{}",
        page_url.scheme(),
        page_url.host_str().unwrap_or_default()
    );
    if let Some(port) = page_url.port()
        && port != 80
        && port != 443
    {
        root.push_str(&format!(":{port}"));
    }
    root
}
