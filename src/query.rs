//! Per-request orchestration over the metrics and recommendation engines.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::QueryError;
use crate::metrics::{county, network, specialty, terminated};
use crate::models::{
    CountyStats, FilterRequest, NetworkMembership, Provider, RadiusAnalysis, Recommendation,
    SpecialtyDensityReport, TerminatedAnalysisResult,
};
use crate::recommend::{self, CountyFacts};
use crate::source::DataSource;

pub type QueryResult<T> = Result<T, QueryError>;

pub struct Analytics<S> {
    source: Arc<S>,
    clock: fn() -> DateTime<Utc>,
}

impl<S> Clone for Analytics<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            clock: self.clock,
        }
    }
}

impl<S: DataSource + 'static> Analytics<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            clock: Utc::now,
        }
    }

    /// Replaces the time source used for the termination window.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    pub fn providers(&self) -> QueryResult<Vec<Provider>> {
        Ok(self.source().providers()?.to_vec())
    }

    pub fn memberships(&self) -> QueryResult<Vec<NetworkMembership>> {
        Ok(self.source().memberships()?.to_vec())
    }

    pub fn county_stats(&self) -> QueryResult<Vec<CountyStats>> {
        Ok(county::county_stats(self.source())?)
    }

    pub fn county_stats_for(&self, name: &str) -> QueryResult<CountyStats> {
        county::county_stats_for(self.source(), name)?
            .ok_or_else(|| QueryError::NotFound(format!("county {name}")))
    }

    pub fn recommendations(&self, name: &str) -> QueryResult<Vec<Recommendation>> {
        let stats = self.county_stats_for(name)?;
        let providers = self.source().providers()?;
        let facts = CountyFacts::gather(&stats, county::providers_in_county(providers, name));
        Ok(recommend::generate(name, &facts))
    }

    pub fn active_provider_count(&self) -> QueryResult<usize> {
        Ok(county::active_provider_count(self.source())?)
    }

    pub fn terminated_network_analysis(
        &self,
        network_id: &str,
    ) -> QueryResult<TerminatedAnalysisResult> {
        let network_id = required("network_id", network_id)?;
        Ok(terminated::terminated_network_analysis(
            self.source(),
            network_id,
            (self.clock)(),
        )?)
    }

    pub fn county_terminated_network_analysis(
        &self,
        name: &str,
        network_id: &str,
    ) -> QueryResult<TerminatedAnalysisResult> {
        let network_id = required("network_id", network_id)?;
        Ok(terminated::county_terminated_network_analysis(
            self.source(),
            name,
            network_id,
            (self.clock)(),
        )?)
    }

    pub fn specialty_density(&self, name: &str) -> QueryResult<SpecialtyDensityReport> {
        Ok(specialty::specialty_density(self.source(), name)?)
    }

    pub fn radius_analysis(
        &self,
        name: &str,
        radius: i64,
        network_id: &str,
    ) -> QueryResult<RadiusAnalysis> {
        let network_id = required("network", network_id)?;
        Ok(network::radius_analysis(
            self.source(),
            name,
            radius,
            network_id,
        )?)
    }

    pub fn filtered_providers(&self, filter: &FilterRequest) -> QueryResult<Vec<Provider>> {
        let network_id = required("network", &filter.network)?;
        Ok(network::filtered_providers(
            self.source(),
            &filter.specialty,
            network_id,
        )?)
    }
}

/// Rejects blank input; anything else is matched exactly as given.
fn required<'a>(name: &str, value: &'a str) -> QueryResult<&'a str> {
    if value.trim().is_empty() {
        return Err(QueryError::InvalidInput(format!("{name} is required")));
    }
    Ok(value)
}
