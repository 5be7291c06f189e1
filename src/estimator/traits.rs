//! Trait abstraction for the estimation service to enable mocking in tests

use super::error::EstimateError;
use super::payload::AnalyzeRequest;
use crate::state::PlanDocument;
use async_trait::async_trait;

/// Remote construction-plan estimator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteEstimator: Send + Sync {
    /// Submit project parameters and receive a plan.
    /// The implementation owns the request timeout.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<PlanDocument, EstimateError>;
}
