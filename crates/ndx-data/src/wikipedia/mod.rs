//! Wikipedia constituent table scraping.

pub mod constituents;

pub use constituents::{
    DEFAULT_URL, HtmlFileSource, LoaderConfig, WikipediaConstituentSource, parse_constituents,
};
