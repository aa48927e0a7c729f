use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::{ClientError, ReferralApi};
use crate::config::ClientConfig;
use crate::domain::{ListFilter, Referral, ReferralChanges, ReferralDraft, ReferralPage};
use crate::server::ErrorBody;

/// [`ReferralApi`] over HTTP with a static bearer token.
pub struct HttpReferralApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpReferralApi {
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| ClientError::InvalidUrl {
            url: base_url.clone(),
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            config.bearer_token.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        Url::parse(&url).map_err(|_| ClientError::InvalidUrl { url })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Bearer {}", self.token))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Bodies that are not `{"error": ...}` still classify by status.
        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error);
        tracing::debug!(status = status.as_u16(), ?message, "Referral service error");
        Err(ClientError::from_status(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.send(builder).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ReferralApi for HttpReferralApi {
    async fn list(&self, filter: &ListFilter) -> Result<ReferralPage, ClientError> {
        let mut url = self.url("/referrals")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(status) = filter.status {
                query.append_pair("status", status.as_str());
            }
            if let Some(limit) = filter.limit {
                query.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = filter.offset {
                query.append_pair("offset", &offset.to_string());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        self.send_json(self.client.get(url)).await
    }

    async fn get(&self, id: i64) -> Result<Referral, ClientError> {
        let url = self.url(&format!("/referrals/{id}"))?;
        self.send_json(self.client.get(url)).await
    }

    async fn create(&self, draft: &ReferralDraft) -> Result<Referral, ClientError> {
        let url = self.url("/referrals")?;
        self.send_json(self.client.post(url).json(draft)).await
    }

    async fn update(&self, id: i64, changes: &ReferralChanges) -> Result<Referral, ClientError> {
        let url = self.url(&format!("/referrals/{id}"))?;
        self.send_json(self.client.patch(url).json(changes)).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("/referrals/{id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        let result = HttpReferralApi::new("not a url", "t", Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }

    #[test]
    fn trims_trailing_slash() {
        let api = HttpReferralApi::new("http://127.0.0.1:3000/", "t", Duration::from_secs(1))
            .unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:3000");
        assert_eq!(
            api.url("/referrals/7").unwrap().as_str(),
            "http://127.0.0.1:3000/referrals/7"
        );
    }

    #[test]
    fn builds_from_config() {
        let api = HttpReferralApi::from_config(&ClientConfig::default()).unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:3000");
    }
}
