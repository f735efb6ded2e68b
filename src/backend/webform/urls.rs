//! Webform URL assembly
//!
//! Pure mapping from an internal survey id and the request origin to the URL
//! set returned by the API. Query strings are written by hand: in edit mode
//! the `instance` parameter always precedes `iframe`.

use crate::shared::config::SURVEY_ID_PREFIX;
use crate::shared::{UrlOptions, WebformType, WebformUrls};

/// Request-derived inputs for URL assembly
#[derive(Debug, Clone)]
pub struct UrlContext {
    pub protocol: String,
    pub host: String,
    pub options: UrlOptions,
    /// `instance_id` request parameter, used by edit URLs
    pub instance_id: Option<String>,
}

const IFRAME_QUERY: &str = "?iframe=true";

pub fn generate_webform_urls(id: &str, ctx: &UrlContext) -> WebformUrls {
    let base_url = format!("{}://{}/", ctx.protocol, ctx.host);
    let id_part = format!("{}{}", SURVEY_ID_PREFIX, id);
    let iframe_part = if ctx.options.iframe { IFRAME_QUERY } else { "" };

    match ctx.options.webform_type {
        WebformType::Preview => WebformUrls {
            preview_url: Some(format!("{base_url}preview/{id_part}{iframe_part}")),
            ..Default::default()
        },
        WebformType::Edit => {
            let iframe_part = if ctx.options.iframe { "&iframe=true" } else { "" };
            let instance_id = ctx.instance_id.as_deref().unwrap_or_default();
            WebformUrls {
                edit_url: Some(format!(
                    "{base_url}edit/{id_part}?instance={instance_id}{iframe_part}"
                )),
                ..Default::default()
            }
        }
        WebformType::All => {
            let url = format!("{base_url}{id_part}");
            let preview_url = format!("{base_url}preview/{id_part}");
            WebformUrls {
                iframe_url: Some(format!("{url}{IFRAME_QUERY}")),
                url: Some(url),
                preview_iframe_url: Some(format!("{preview_url}{IFRAME_QUERY}")),
                preview_url: Some(preview_url),
                subdomain: Some(String::new()),
                ..Default::default()
            }
        }
        WebformType::Default => WebformUrls {
            url: Some(format!("{base_url}{id_part}{iframe_part}")),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(host: &str, webform_type: WebformType, iframe: bool) -> UrlContext {
        UrlContext {
            protocol: "https".to_string(),
            host: host.to_string(),
            options: UrlOptions::new(webform_type, iframe),
            instance_id: None,
        }
    }

    #[test]
    fn test_all_mode_produces_every_variant() {
        let urls = generate_webform_urls("abc", &ctx("example.org", WebformType::All, false));
        assert_eq!(
            urls,
            WebformUrls {
                url: Some("https://example.org/::abc".into()),
                iframe_url: Some("https://example.org/::abc?iframe=true".into()),
                preview_url: Some("https://example.org/preview/::abc".into()),
                preview_iframe_url: Some("https://example.org/preview/::abc?iframe=true".into()),
                edit_url: None,
                subdomain: Some(String::new()),
            }
        );
    }

    #[test]
    fn test_all_mode_ignores_iframe_flag() {
        let plain = generate_webform_urls("abc", &ctx("example.org", WebformType::All, false));
        let iframe = generate_webform_urls("abc", &ctx("example.org", WebformType::All, true));
        assert_eq!(plain, iframe);
    }

    #[test]
    fn test_edit_mode_orders_instance_before_iframe() {
        let mut context = ctx("h", WebformType::Edit, true);
        context.instance_id = Some("i1".into());
        let urls = generate_webform_urls("abc", &context);
        assert_eq!(
            urls.edit_url.as_deref(),
            Some("https://h/edit/::abc?instance=i1&iframe=true")
        );
        assert_eq!(urls.url, None);
    }

    #[test]
    fn test_edit_mode_without_iframe() {
        let mut context = ctx("h", WebformType::Edit, false);
        context.instance_id = Some("i1".into());
        let urls = generate_webform_urls("abc", &context);
        assert_eq!(urls.edit_url.as_deref(), Some("https://h/edit/::abc?instance=i1"));
    }

    #[test]
    fn test_preview_mode() {
        let urls = generate_webform_urls("abc", &ctx("h", WebformType::Preview, true));
        assert_eq!(urls.preview_url.as_deref(), Some("https://h/preview/::abc?iframe=true"));
        assert_eq!(urls.url, None);
    }

    #[test]
    fn test_default_mode() {
        let urls = generate_webform_urls("abc", &ctx("h:8005", WebformType::Default, false));
        assert_eq!(urls.url.as_deref(), Some("https://h:8005/::abc"));

        let urls = generate_webform_urls("abc", &ctx("h:8005", WebformType::Default, true));
        assert_eq!(urls.url.as_deref(), Some("https://h:8005/::abc?iframe=true"));
    }
}
