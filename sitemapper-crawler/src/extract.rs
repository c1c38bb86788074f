use crate::url::{CrawlUrl, resolve_child_url};
use scraper::{Html, Selector};

/// The URLs discovered on one page, one list per category. Each list is
/// sorted lexicographically by address, independently of the others, so
/// the site map is deterministic regardless of DOM order.
#[derive(Debug)]
pub struct PageLinks {
    pub children: Vec<CrawlUrl>,
    pub stylesheets: Vec<CrawlUrl>,
    pub scripts: Vec<CrawlUrl>,
    pub images: Vec<CrawlUrl>,
}

/// Pulls the four link categories out of a fetched page body. Parsing is
/// lenient (html5ever recovers from any malformed input), so extraction
/// itself cannot fail.
pub fn extract_page_links(page_url: &str, body: &str) -> PageLinks {
    let document = Html::parse_document(body);
    PageLinks {
        children: extract_category(page_url, &document, "a", "href"),
        stylesheets: extract_category(page_url, &document, r#"link[rel="stylesheet"]"#, "href"),
        scripts: extract_category(page_url, &document, r#"script[type="text/javascript"]"#, "src"),
        images: extract_category(page_url, &document, "img", "src"),
    }
}

fn extract_category(
    page_url: &str,
    document: &Html,
    element_selector: &str,
    attribute: &str,
) -> Vec<CrawlUrl> {
    let selector = Selector::parse(element_selector).unwrap();

    let mut urls: Vec<CrawlUrl> = document
        .select(&selector)
        .filter_map(|element| element.value().attr(attribute))
        .filter(|child_url| !child_url.is_empty())
        // in-page fragment references are not part of the site map
        .filter(|child_url| !child_url.starts_with('#') && !child_url.starts_with("/#"))
        .map(|child_url| resolve_child_url(page_url, child_url))
        .collect();

    urls.sort_by(|a, b| a.address().cmp(b.address()));
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "http://example.com/parent/";

    #[test]
    fn extracts_all_four_categories() {
        let body = r#"<html>
            <head>
                <link rel="stylesheet" type="text/css" href="/static/main.css" />
                <script type="text/javascript" src="/static/main.js"></script>
            </head>
            <body>
                <a href="/child1">Child 1</a>
                <img src="/static/logo.gif">
            </body>
        </html>"#;

        let links = extract_page_links(PAGE_URL, body);

        assert_eq!(links.children.len(), 1);
        assert_eq!(links.children[0].address(), "http://example.com/child1");
        assert_eq!(links.stylesheets.len(), 1);
        assert_eq!(
            links.stylesheets[0].address(),
            "http://example.com/static/main.css"
        );
        assert_eq!(links.scripts.len(), 1);
        assert_eq!(
            links.scripts[0].address(),
            "http://example.com/static/main.js"
        );
        assert_eq!(links.images.len(), 1);
        assert_eq!(
            links.images[0].address(),
            "http://example.com/static/logo.gif"
        );
    }

    #[test]
    fn links_are_sorted_by_address_not_document_order() {
        let body = r#"<html>
            <a href="/c">C</a>
            <a href="/a">A</a>
            <a href="/b">B</a>
        </html>"#;

        let links = extract_page_links(PAGE_URL, body);

        let addresses: Vec<&str> = links.children.iter().map(|u| u.address()).collect();
        assert_eq!(
            addresses,
            vec![
                "http://example.com/a",
                "http://example.com/b",
                "http://example.com/c",
            ]
        );
    }

    #[test]
    fn anchor_without_href_is_skipped() {
        let body = "<html><a>no href here</a></html>";
        let links = extract_page_links(PAGE_URL, body);
        assert!(links.children.is_empty());
    }

    #[test]
    fn empty_href_is_skipped() {
        let body = r#"<html><a href="">empty</a></html>"#;
        let links = extract_page_links(PAGE_URL, body);
        assert!(links.children.is_empty());
    }

    #[test]
    fn fragment_references_are_skipped() {
        let body = r##"<html>
            <a href="#section">in-page</a>
            <a href="/#top">root fragment</a>
            <a href="/real">real</a>
        </html>"##;

        let links = extract_page_links(PAGE_URL, body);

        assert_eq!(links.children.len(), 1);
        assert_eq!(links.children[0].address(), "http://example.com/real");
    }

    #[test]
    fn untyped_script_is_not_extracted() {
        let body = r#"<html>
            <script src="/untyped.js"></script>
            <script type="text/javascript" src="/typed.js"></script>
        </html>"#;

        let links = extract_page_links(PAGE_URL, body);

        assert_eq!(links.scripts.len(), 1);
        assert_eq!(links.scripts[0].address(), "http://example.com/typed.js");
    }

    #[test]
    fn external_children_keep_their_flag() {
        let body = r#"<html>
            <a href="/child1">internal</a>
            <a href="http://google.com">external</a>
        </html>"#;

        let links = extract_page_links(PAGE_URL, body);

        assert_eq!(links.children.len(), 2);
        assert!(links.children[0].is_crawlable());
        assert_eq!(links.children[1].address(), "http://google.com");
        assert!(!links.children[1].is_crawlable());
    }
}
