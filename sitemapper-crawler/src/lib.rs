pub mod crawler;
pub mod error;
pub mod extract;
pub mod url;

pub use crawler::Crawler;
pub use error::{CrawlError, FetchError};
pub use extract::PageLinks;
pub use url::CrawlUrl;
