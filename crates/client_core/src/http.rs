use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Survey, SurveyId},
    error::ApiError,
};
use tracing::warn;
use url::Url;

use crate::{ApiClientError, SurveyApi};

/// Survey backend client over plain HTTP.
///
/// Endpoints: `GET {base}/surveys` for the list, `GET {base}/surveys/{id}`
/// for a single survey. Non-2xx responses are mapped to a structured
/// [`ApiError`] when the server sends one, otherwise to the bare status.
#[derive(Debug)]
pub struct HttpSurveyApi {
    http: Client,
    base_url: String,
}

impl HttpSurveyApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiClientError> {
        let base_url = base_url.into();
        Url::parse(&base_url)?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn reject(response: Response) -> ApiClientError {
        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(error) => {
                warn!(%status, code = ?error.code, "survey api rejected request");
                ApiClientError::Api { status, error }
            }
            Err(_) => {
                warn!(%status, "survey api returned non-json error body");
                ApiClientError::Status(status)
            }
        }
    }
}

#[async_trait]
impl SurveyApi for HttpSurveyApi {
    async fn fetch_surveys(&self) -> Result<Vec<Survey>, ApiClientError> {
        let response = self
            .http
            .get(format!("{}/surveys", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(response.json().await?)
    }

    async fn fetch_survey(&self, id: SurveyId) -> Result<Survey, ApiClientError> {
        let response = self
            .http
            .get(format!("{}/surveys/{}", self.base_url, id.0))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(response.json().await?)
    }
}
