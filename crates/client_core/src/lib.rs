use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Survey, SurveyId},
    error::ApiError,
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::info;

pub mod http;
pub use http::HttpSurveyApi;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("survey request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request with status {status}: {error}")]
    Api {
        status: reqwest::StatusCode,
        error: ApiError,
    },
    #[error("server returned unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid server base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("survey api unavailable: {0}")]
    Unavailable(&'static str),
}

/// Fetch seam for the survey backend. The store never talks HTTP directly;
/// everything goes through this trait so tests can substitute a double.
#[async_trait]
pub trait SurveyApi: Send + Sync {
    async fn fetch_surveys(&self) -> Result<Vec<Survey>, ApiClientError>;
    async fn fetch_survey(&self, id: SurveyId) -> Result<Survey, ApiClientError>;
}

pub struct MissingSurveyApi;

#[async_trait]
impl SurveyApi for MissingSurveyApi {
    async fn fetch_surveys(&self) -> Result<Vec<Survey>, ApiClientError> {
        Err(ApiClientError::Unavailable("no survey backend configured"))
    }

    async fn fetch_survey(&self, _id: SurveyId) -> Result<Survey, ApiClientError> {
        Err(ApiClientError::Unavailable("no survey backend configured"))
    }
}

/// Emitted after a mutator commits, so UI layers can re-render from a fresh
/// snapshot instead of watching the state object itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    SurveysReplaced { count: usize },
    CurrentSurveyReplaced { survey_id: SurveyId },
}

/// Immutable copy of the store contents at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub surveys: Vec<Survey>,
    pub current_survey: Option<Survey>,
}

struct StoreState {
    surveys: Vec<Survey>,
    current_survey: Option<Survey>,
}

/// Single source of truth for survey data on the client.
///
/// Reads hand out snapshots; the only writers are [`SurveyStore::set_surveys`]
/// and [`SurveyStore::set_survey`], which the loaders call after a successful
/// fetch. Concurrent loads are not sequenced: whichever commit lands last
/// wins, even if its response was requested first.
pub struct SurveyStore {
    api: Arc<dyn SurveyApi>,
    inner: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

impl SurveyStore {
    pub fn new() -> Self {
        Self::with_api(Arc::new(MissingSurveyApi))
    }

    pub fn with_api(api: Arc<dyn SurveyApi>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            inner: Mutex::new(StoreState {
                surveys: Vec::new(),
                current_survey: None,
            }),
            events,
        }
    }

    /// Fetches the full survey list and commits it. The error is returned
    /// to the caller untouched; state only changes on success.
    pub async fn load_surveys(&self) -> Result<(), ApiClientError> {
        let surveys = self.api.fetch_surveys().await?;
        self.set_surveys(surveys).await;
        Ok(())
    }

    /// Fetches one survey by id and commits it as the current survey.
    pub async fn load_survey(&self, id: SurveyId) -> Result<(), ApiClientError> {
        let survey = self.api.fetch_survey(id).await?;
        self.set_survey(survey).await;
        Ok(())
    }

    /// Replaces the survey list wholesale. No merge, no dedup; the payload
    /// order is kept as-is.
    pub async fn set_surveys(&self, surveys: Vec<Survey>) {
        let count = surveys.len();
        {
            let mut state = self.inner.lock().await;
            state.surveys = surveys;
        }
        info!(count, "survey list replaced");
        let _ = self.events.send(StoreEvent::SurveysReplaced { count });
    }

    /// Replaces the current survey. Every question's `choice` is cleared
    /// first so a freshly opened survey never carries stale selections.
    pub async fn set_survey(&self, mut survey: Survey) {
        for question in &mut survey.questions {
            question.choice = None;
        }
        let survey_id = survey.survey_id;
        {
            let mut state = self.inner.lock().await;
            state.current_survey = Some(survey);
        }
        info!(survey_id = survey_id.0, "current survey replaced");
        let _ = self
            .events
            .send(StoreEvent::CurrentSurveyReplaced { survey_id });
    }

    pub async fn surveys(&self) -> Vec<Survey> {
        self.inner.lock().await.surveys.clone()
    }

    /// `None` until the first `load_survey` (or `set_survey`) commits.
    pub async fn current_survey(&self) -> Option<Survey> {
        self.inner.lock().await.current_survey.clone()
    }

    /// Both fields under one lock acquisition, for readers that need a
    /// view that is consistent across them.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.inner.lock().await;
        StoreSnapshot {
            surveys: state.surveys.clone(),
            current_survey: state.current_survey.clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

impl Default for SurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
