//! Read-only access to the loaded network tables.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::de::DeserializeOwned;

use crate::models::{CountyArea, CountyClaims, NetworkMembership, Provider, ServiceLocation};
use crate::storage::{StoragePaths, file_present_nonempty};

/// Area used when a county has no row in the area table.
pub const DEFAULT_COUNTY_AREA_SQ_MILES: f64 = 700.0;

/// Query surface the metrics engine needs. Implementations must not change
/// their contents while shared.
pub trait DataSource: Send + Sync {
    fn providers(&self) -> anyhow::Result<&[Provider]>;
    fn memberships(&self) -> anyhow::Result<&[NetworkMembership]>;
    fn service_locations(&self) -> anyhow::Result<&[ServiceLocation]>;
    fn county_claims(&self) -> anyhow::Result<&[CountyClaims]>;
    fn county_area(&self, county: &str) -> f64;
    fn specialty_standards(&self) -> anyhow::Result<&BTreeMap<String, f64>>;
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub providers: Vec<Provider>,
    pub memberships: Vec<NetworkMembership>,
    pub service_locations: Vec<ServiceLocation>,
    pub county_claims: Vec<CountyClaims>,
    pub county_areas: Vec<CountyArea>,
    pub specialty_standards: BTreeMap<String, f64>,
}

/// Immutable in-memory snapshot of every table.
#[derive(Debug, Clone)]
pub struct Snapshot {
    tables: Tables,
}

impl Snapshot {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    /// Loads all six tables. Any missing or malformed file is an error.
    pub fn load(paths: &StoragePaths) -> anyhow::Result<Self> {
        for file in paths.all_files() {
            if !file_present_nonempty(file) {
                return Err(anyhow!("required data file {} not found", file.display()));
            }
        }

        let tables = Tables {
            providers: read_json(&paths.providers)?,
            memberships: read_json(&paths.memberships)?,
            service_locations: read_json(&paths.service_locations)?,
            county_claims: read_json(&paths.claims)?,
            county_areas: read_json(&paths.county_areas)?,
            specialty_standards: read_json(&paths.specialty_standards)?,
        };

        let snapshot = Self::new(tables);
        let summary = snapshot.summary();
        tracing::info!(
            "Loaded snapshot from {}: providers={} memberships={} service_locations={} counties_with_claims={} county_areas={} specialties={}",
            paths.data_dir.display(),
            summary.providers,
            summary.memberships,
            summary.service_locations,
            summary.county_claims,
            summary.county_areas,
            summary.specialty_standards,
        );
        if summary.dangling_memberships > 0 || summary.dangling_locations > 0 {
            tracing::warn!(
                "Rows reference unknown provider IDs: memberships={} service_locations={}",
                summary.dangling_memberships,
                summary.dangling_locations
            );
        }
        Ok(snapshot)
    }

    pub fn summary(&self) -> SnapshotSummary {
        let t = &self.tables;
        let known: HashSet<&str> = t.providers.iter().map(|p| p.provider_id.as_str()).collect();
        SnapshotSummary {
            providers: t.providers.len(),
            memberships: t.memberships.len(),
            service_locations: t.service_locations.len(),
            county_claims: t.county_claims.len(),
            county_areas: t.county_areas.len(),
            specialty_standards: t.specialty_standards.len(),
            dangling_memberships: t
                .memberships
                .iter()
                .filter(|m| !known.contains(m.provider_id.as_str()))
                .count(),
            dangling_locations: t
                .service_locations
                .iter()
                .filter(|l| !known.contains(l.provider_id.as_str()))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub providers: usize,
    pub memberships: usize,
    pub service_locations: usize,
    pub county_claims: usize,
    pub county_areas: usize,
    pub specialty_standards: usize,
    pub dangling_memberships: usize,
    pub dangling_locations: usize,
}

impl DataSource for Snapshot {
    fn providers(&self) -> anyhow::Result<&[Provider]> {
        Ok(&self.tables.providers)
    }

    fn memberships(&self) -> anyhow::Result<&[NetworkMembership]> {
        Ok(&self.tables.memberships)
    }

    fn service_locations(&self) -> anyhow::Result<&[ServiceLocation]> {
        Ok(&self.tables.service_locations)
    }

    fn county_claims(&self) -> anyhow::Result<&[CountyClaims]> {
        Ok(&self.tables.county_claims)
    }

    fn county_area(&self, county: &str) -> f64 {
        self.tables
            .county_areas
            .iter()
            .find(|a| a.county == county)
            .map(|a| a.area_sq_miles)
            .unwrap_or(DEFAULT_COUNTY_AREA_SQ_MILES)
    }

    fn specialty_standards(&self) -> anyhow::Result<&BTreeMap<String, f64>> {
        Ok(&self.tables.specialty_standards)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}
