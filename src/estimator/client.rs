//! HTTP client for the construction estimation service
//!
//! Posts the project parameters as JSON to `{base}/analyze` and decodes the
//! plan. ureq is blocking, so each call runs on tokio's blocking pool.

use super::error::EstimateError;
use super::payload::AnalyzeRequest;
use super::traits::RemoteEstimator;
use crate::state::PlanDocument;
use async_trait::async_trait;
use std::time::Duration;

/// Client for the estimation service
pub struct HttpEstimator {
    /// Shared ureq agent (connection pool, timeout)
    agent: ureq::Agent,
    /// Full `/analyze` URL
    endpoint: String,
}

impl HttpEstimator {
    /// Create a client for a service base URL such as `http://host:8000/api`
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        Self {
            agent: config.into(),
            endpoint: analyze_endpoint(base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteEstimator for HttpEstimator {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<PlanDocument, EstimateError> {
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let body = request.clone();

        tracing::debug!(%endpoint, "posting analyze request");
        tokio::task::spawn_blocking(move || post_analyze(&agent, &endpoint, &body))
            .await
            .map_err(|e| EstimateError::Unexpected(format!("estimator task failed: {e}")))?
    }
}

fn post_analyze(
    agent: &ureq::Agent,
    endpoint: &str,
    body: &AnalyzeRequest,
) -> Result<PlanDocument, EstimateError> {
    let mut response = agent.post(endpoint).send_json(body)?;
    let plan = response.body_mut().read_json::<PlanDocument>()?;
    Ok(plan)
}

/// Join the base URL and the analyze route without doubling slashes
fn analyze_endpoint(base_url: &str) -> String {
    format!("{}/analyze", base_url.trim_end_matches('/'))
}
