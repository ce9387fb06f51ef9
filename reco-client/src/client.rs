use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use ts_core::TimeFrame;

use crate::{
    CandlesResponse, HealthResponse, LatestSnapshot, NotifyResponse, RecoApi, RecoError,
    RecommendResponse, Side,
};

/// Number of bars requested for the chart.
pub const DEFAULT_CANDLE_LIMIT: usize = 5000;

/// Backend base URL baked in at compile time; empty means same origin.
const BUILD_API_BASE: Option<&str> = option_env!("RECO_API_BASE");

#[derive(Debug, Clone)]
pub struct RecoConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl RecoConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL compiled into the binary, if any.
    pub fn build_time_base() -> Option<&'static str> {
        BUILD_API_BASE.map(str::trim).filter(|s| !s.is_empty())
    }
}

impl Default for RecoConfig {
    fn default() -> Self {
        Self {
            base_url: Self::build_time_base().unwrap_or_default().to_string(),
            user_agent: "reco-dashboard/0.1".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct RecoClient {
    config: RecoConfig,
    http: reqwest::Client,
}

impl RecoClient {
    pub fn new(config: RecoConfig) -> Result<Self, RecoError> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::builder().build()?;
        Ok(Self { config, http })
    }

    /// Absolute URL for an API path with the given query pairs appended.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, RecoError> {
        let base = self.config.base_url.trim_end_matches('/');
        let raw = format!("{base}{path}");
        let mut url = Url::parse(&raw).map_err(|e| RecoError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RecoError> {
        let url = self.endpoint(path, query)?;
        log::debug!("{method} {url}");
        let resp = self.http.request(method, url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RecoError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| RecoError::Decode(e.to_string()))
    }
}

fn reco_query(side: Side, risk_pct: Option<f64>, tf: Option<TimeFrame>) -> Vec<(&'static str, String)> {
    let mut q = vec![("side", side.as_str().to_string())];
    if let Some(risk) = risk_pct.filter(|r| r.is_finite()) {
        q.push(("risk_pct", risk.to_string()));
    }
    if let Some(tf) = tf {
        q.push(("tf", tf.label()));
    }
    q
}

#[async_trait(?Send)]
impl RecoApi for RecoClient {
    async fn health(&self) -> Result<HealthResponse, RecoError> {
        self.send(Method::GET, "/api/health", &[]).await
    }

    async fn latest(&self) -> Result<LatestSnapshot, RecoError> {
        self.send(Method::GET, "/api/latest", &[]).await
    }

    async fn recommend(
        &self,
        side: Side,
        risk_pct: Option<f64>,
        tf: Option<TimeFrame>,
    ) -> Result<RecommendResponse, RecoError> {
        let q = reco_query(side, risk_pct, tf);
        self.send(Method::GET, "/api/recommend", &q).await
    }

    async fn candles(&self, tf: TimeFrame, limit: usize) -> Result<CandlesResponse, RecoError> {
        let q = [("tf", tf.label()), ("limit", limit.to_string())];
        self.send(Method::GET, "/api/candles", &q).await
    }

    async fn notify_recommend(
        &self,
        side: Side,
        risk_pct: Option<f64>,
        tf: Option<TimeFrame>,
    ) -> Result<NotifyResponse, RecoError> {
        let q = reco_query(side, risk_pct, tf);
        self.send(Method::POST, "/api/notify/recommend", &q).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RecoClient {
        RecoClient::new(RecoConfig::new(base)).unwrap()
    }

    #[test]
    fn endpoint_joins_base_and_query() {
        let c = client("http://localhost:8000/");
        let url = c
            .endpoint("/api/candles", &[("tf", "30m".into()), ("limit", "5000".into())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/candles?tf=30m&limit=5000");
    }

    #[test]
    fn empty_base_cannot_form_absolute_url() {
        let err = client("").endpoint("/api/health", &[]).unwrap_err();
        assert!(matches!(err, RecoError::InvalidUrl(_)));
    }

    #[test]
    fn risk_is_sent_only_when_finite() {
        let q = reco_query(Side::Short, Some(f64::NAN), None);
        assert_eq!(q, vec![("side", "short".to_string())]);
        let q = reco_query(Side::Long, Some(0.5), Some(TimeFrame::Minutes(180)));
        assert_eq!(
            q,
            vec![
                ("side", "long".to_string()),
                ("risk_pct", "0.5".to_string()),
                ("tf", "180m".to_string()),
            ]
        );
    }
}
