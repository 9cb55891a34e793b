use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiErrorBody,
    protocol::{ActivityCatalog, MessageBody},
};
use tracing::debug;

use crate::{config::Settings, error::ApiCallError};

/// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn list_activities(&self) -> Result<ActivityCatalog, ApiCallError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<MessageBody, ApiCallError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<MessageBody, ApiCallError>;
}

pub struct HttpActivityApi {
    http: Client,
    base_url: String,
}

impl HttpActivityApi {
    /// `base_url` is expected without a trailing slash, see [`crate::config::normalize_base_url`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiCallError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
        })
    }

    pub fn activities_url(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    pub fn signup_url(&self, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/signup?email={}",
            self.base_url,
            encode_uri_component(activity),
            encode_uri_component(email)
        )
    }

    pub fn unregister_url(&self, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/participants/{}",
            self.base_url,
            encode_uri_component(activity),
            encode_uri_component(email)
        )
    }
}

#[async_trait]
impl ActivityApi for HttpActivityApi {
    async fn list_activities(&self) -> Result<ActivityCatalog, ApiCallError> {
        let response = self.http.get(self.activities_url()).send().await?;
        decode_response(response).await
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MessageBody, ApiCallError> {
        let url = self.signup_url(activity, email);
        debug!(%url, "activities: POST signup");
        let response = self.http.post(url).send().await?;
        decode_response(response).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MessageBody, ApiCallError> {
        let url = self.unregister_url(activity, email);
        debug!(%url, "activities: DELETE participant");
        let response = self.http.delete(url).send().await?;
        decode_response(response).await
    }
}

/// Reads the whole body before looking at the status, so a failure status with
/// a non-JSON body is reported as malformed rather than as a rejection.
async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiCallError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&body)
            .map_err(|source| ApiCallError::MalformedBody { status, source });
    }

    let error_body: ApiErrorBody = serde_json::from_slice(&body)
        .map_err(|source| ApiCallError::MalformedBody { status, source })?;
    Err(ApiCallError::Rejected {
        status,
        detail: error_body.detail_text().map(str::to_owned),
    })
}
