//! Search source implementations.
//!
//! Each module provides a struct implementing [`crate::source::SourceAdapter`]
//! that queries one backend family (HTML scrape, JSON API or RSS feed).

pub mod baidu_news;
pub mod baidu_web;
pub mod bing;
pub mod google_news;
pub mod searx;
pub mod sogou_news;

pub use baidu_news::BaiduNewsSource;
pub use baidu_web::BaiduWebSource;
pub use bing::BingSource;
pub use google_news::GoogleNewsSource;
pub use searx::SearxSource;
pub use sogou_news::SogouNewsSource;
