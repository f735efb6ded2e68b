//! HTTP Form Connection
//!
//! [`FormConnection`] over `reqwest`, talking to the webform server:
//!
//! - `POST /transform/xform/::{id}` - form parts
//! - `GET /submission/::{id}?instanceId=` - existing instance
//! - `GET /submission/max-size/` - maximum submission size

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::client::error::ClientError;
use crate::client::services::FormConnection;
use crate::shared::config::SURVEY_ID_PREFIX;
use crate::shared::{ClientSettings, ExistingInstance, FormParts, MaxSizeResponse};

/// Form connection client
#[derive(Debug, Clone, Default)]
pub struct HttpConnection {
    client: Client,
}

impl HttpConnection {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_external_xml(
        &self,
        settings: &ClientSettings,
        src: &str,
    ) -> Result<String, ClientError> {
        let url = if src.starts_with("http://") || src.starts_with("https://") {
            src.to_string()
        } else {
            settings.api_url(src)
        };

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }
}

/// Turn a non-success response into a `ClientError::Fetch`, using the JSON
/// `message` of the body when there is one.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status.to_string();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(fallback);

    tracing::warn!("Request failed: {} - {}", status, message);
    Err(ClientError::fetch(Some(status.as_u16()), message))
}

fn survey_ref(settings: &ClientSettings) -> String {
    format!("{}{}", SURVEY_ID_PREFIX, settings.enketo_id())
}

#[async_trait]
impl FormConnection for HttpConnection {
    async fn get_form_parts(&self, settings: &ClientSettings) -> Result<FormParts, ClientError> {
        let url = settings.api_url(&format!("/transform/xform/{}", survey_ref(settings)));
        tracing::debug!("Fetching form parts from {}", url);

        let response = self.client.post(&url).send().await?;
        let mut parts = check_status(response)
            .await?
            .json::<FormParts>()
            .await
            .map_err(|e| ClientError::fetch(None, format!("Failed to parse form parts: {}", e)))?;

        for external in parts.external_data.iter_mut().filter(|data| data.xml.is_none()) {
            let xml = self.fetch_external_xml(settings, &external.src).await?;
            external.xml = Some(xml);
        }

        Ok(parts)
    }

    async fn get_existing_instance(
        &self,
        settings: &ClientSettings,
    ) -> Result<ExistingInstance, ClientError> {
        let Some(instance_id) = settings.instance_id() else {
            return Ok(ExistingInstance::default());
        };
        let url = settings.api_url(&format!("/submission/{}", survey_ref(settings)));

        let response = self
            .client
            .get(&url)
            .query(&[("instanceId", instance_id)])
            .send()
            .await?;

        check_status(response)
            .await?
            .json::<ExistingInstance>()
            .await
            .map_err(|e| ClientError::fetch(None, format!("Failed to parse instance: {}", e)))
    }

    async fn get_maximum_submission_size(
        &self,
        settings: &ClientSettings,
    ) -> Result<Option<u64>, ClientError> {
        let url = settings.api_url("/submission/max-size/");

        let response = self.client.get(&url).send().await?;
        let body = check_status(response)
            .await?
            .json::<MaxSizeResponse>()
            .await
            .map_err(|e| ClientError::fetch(None, format!("Failed to parse max size: {}", e)))?;

        Ok(body.max_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: &MockServer) -> ClientSettings {
        ClientSettings::builder()
            .server_url(server.uri())
            .enketo_id("abc")
            .instance_id("uuid:1")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_parts_fetches_external_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transform/xform/::abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "form": "<form><h3 id=\"form-title\">T</h3></form>",
                "model": "<model/>",
                "externalData": [
                    { "id": "inline", "src": "jr://file/inline.xml", "xml": "<a/>" },
                    { "id": "cities", "src": "/media/cities.xml" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/media/cities.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<cities/>"))
            .expect(1)
            .mount(&server)
            .await;

        let parts = HttpConnection::new()
            .get_form_parts(&settings(&server))
            .await
            .unwrap();

        assert_eq!(parts.model.as_deref(), Some("<model/>"));
        assert_eq!(parts.external_data[0].xml.as_deref(), Some("<a/>"));
        assert_eq!(parts.external_data[1].xml.as_deref(), Some("<cities/>"));
    }

    #[tokio::test]
    async fn test_existing_instance_uses_instance_id_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/submission/::abc"))
            .and(query_param("instanceId", "uuid:1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "instance": "<data/>",
                "instanceAttachments": [{ "filename": "a.jpg", "url": "/media/a.jpg" }]
            })))
            .mount(&server)
            .await;

        let existing = HttpConnection::new()
            .get_existing_instance(&settings(&server))
            .await
            .unwrap();

        assert_eq!(existing.instance.as_deref(), Some("<data/>"));
        assert_eq!(existing.instance_attachments.len(), 1);
        assert_eq!(existing.instance_attachments[0].filename, "a.jpg");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_401() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transform/xform/::abc"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": 401,
                "message": "Not Allowed. Invalid API key."
            })))
            .mount(&server)
            .await;

        let error = HttpConnection::new()
            .get_form_parts(&settings(&server))
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
        assert_eq!(error.to_string(), "Not Allowed. Invalid API key.");
    }

    #[tokio::test]
    async fn test_maximum_submission_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/submission/max-size/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "maxSize": 1024 })),
            )
            .mount(&server)
            .await;

        let max_size = HttpConnection::new()
            .get_maximum_submission_size(&settings(&server))
            .await
            .unwrap();

        assert_eq!(max_size, Some(1024));
    }

    #[tokio::test]
    async fn test_missing_instance_id_skips_request() {
        let server = MockServer::start().await;
        let settings = ClientSettings::builder()
            .server_url(server.uri())
            .enketo_id("abc")
            .build()
            .unwrap();

        let existing = HttpConnection::new()
            .get_existing_instance(&settings)
            .await
            .unwrap();

        assert_eq!(existing, ExistingInstance::default());
    }
}
