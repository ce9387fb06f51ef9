//! Client for the recommendation backend.
//!
//! [`RecoClient`] talks HTTP; [`RecoApi`] is the seam the polling loops and
//! the dashboard controller are written against so they can run on fakes.

mod client;
mod error;
mod types;

pub use client::{RecoClient, RecoConfig, DEFAULT_CANDLE_LIMIT};
pub use error::RecoError;
pub use types::*;

use async_trait::async_trait;
use ts_core::TimeFrame;

/// Backend operations used by the dashboard.
///
/// Futures are not `Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait RecoApi {
    async fn health(&self) -> Result<HealthResponse, RecoError>;

    async fn latest(&self) -> Result<LatestSnapshot, RecoError>;

    async fn recommend(
        &self,
        side: Side,
        risk_pct: Option<f64>,
        tf: Option<TimeFrame>,
    ) -> Result<RecommendResponse, RecoError>;

    async fn candles(&self, tf: TimeFrame, limit: usize) -> Result<CandlesResponse, RecoError>;

    async fn notify_recommend(
        &self,
        side: Side,
        risk_pct: Option<f64>,
        tf: Option<TimeFrame>,
    ) -> Result<NotifyResponse, RecoError>;
}

#[async_trait(?Send)]
impl<T: RecoApi + ?Sized> RecoApi for std::rc::Rc<T> {
    async fn health(&self) -> Result<HealthResponse, RecoError> {
        (**self).health().await
    }

    async fn latest(&self) -> Result<LatestSnapshot, RecoError> {
        (**self).latest().await
    }

    async fn recommend(
        &self,
        side: Side,
        risk_pct: Option<f64>,
        tf: Option<TimeFrame>,
    ) -> Result<RecommendResponse, RecoError> {
        (**self).recommend(side, risk_pct, tf).await
    }

    async fn candles(&self, tf: TimeFrame, limit: usize) -> Result<CandlesResponse, RecoError> {
        (**self).candles(tf, limit).await
    }

    async fn notify_recommend(
        &self,
        side: Side,
        risk_pct: Option<f64>,
        tf: Option<TimeFrame>,
    ) -> Result<NotifyResponse, RecoError> {
        (**self).notify_recommend(side, risk_pct, tf).await
    }
}
