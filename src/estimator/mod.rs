//! Estimation service client module

mod client;
mod error;
mod payload;
mod traits;

pub use client::HttpEstimator;
pub use error::EstimateError;
pub use payload::AnalyzeRequest;
pub use traits::RemoteEstimator;

#[cfg(test)]
pub use traits::MockRemoteEstimator;
