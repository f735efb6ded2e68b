//! Webform URL assembly

pub mod urls;

pub use urls::{generate_webform_urls, UrlContext};
