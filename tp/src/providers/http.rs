//! HTTP plan service client
//!
//! JSON client for the external trip-planning service, implementing both
//! stop lookup and plan computation against its REST endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::domain::{GeoCoordinate, PlanQuery, PlanResult, Stop};

use super::{Planner, ProviderError, StopLookup};

/// Client for the trip-planning service's HTTP API
pub struct HttpPlanService {
    base_url: String,
    http: Client,
}

impl HttpPlanService {
    /// Create a new client from configuration
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ProviderError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }
}

/// Stop record as the service returns it
#[derive(Debug, Deserialize)]
struct StopDto {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl From<StopDto> for Stop {
    fn from(dto: StopDto) -> Self {
        Stop::new(dto.id, dto.name, GeoCoordinate::new(dto.latitude, dto.longitude))
    }
}

/// Coordinate pair as the service returns it
#[derive(Debug, Deserialize)]
struct MarkerDto {
    latitude: f64,
    longitude: f64,
}

/// Plan response body; the service sends JSON `null` when no plan exists
#[derive(Debug, Deserialize)]
struct PlanDto {
    plan: Vec<String>,
    markers: Vec<MarkerDto>,
}

impl From<PlanDto> for PlanResult {
    fn from(dto: PlanDto) -> Self {
        PlanResult {
            lines: dto.plan,
            markers: dto
                .markers
                .into_iter()
                .map(|m| GeoCoordinate::new(m.latitude, m.longitude))
                .collect(),
        }
    }
}

#[async_trait]
impl StopLookup for HttpPlanService {
    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, ProviderError> {
        debug!(%query, "lookup_stops: called");
        let url = format!("{}/stops", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "lookup_stops: non-success status");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(ProviderError::Network)?;
        let stops: Vec<StopDto> =
            serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        debug!(count = stops.len(), "lookup_stops: resolved");
        Ok(stops.into_iter().map(Stop::from).collect())
    }
}

#[async_trait]
impl Planner for HttpPlanService {
    async fn compute_plan(&self, query: PlanQuery) -> Result<Option<PlanResult>, ProviderError> {
        debug!(?query, "compute_plan: called");
        let url = format!("{}/plan", self.base_url);

        let body = serde_json::json!({
            "source": query.source,
            "target": query.target,
            "time": query.time,
            "plan-type": query.plan_type,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "compute_plan: non-success status");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(ProviderError::Network)?;
        let plan: Option<PlanDto> =
            serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        debug!(has_plan = plan.is_some(), "compute_plan: completed");
        Ok(plan.map(PlanResult::from))
    }
}
