use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Year carried by the termination date of rows that are still in effect.
pub const ACTIVE_SENTINEL_YEAR: i32 = 9999;

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_TERMINATED: &str = "Terminated";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: String,
    pub npi: String,
    pub provider_type: String,
    pub status: String,
    pub county: String,
}

impl Provider {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMembership {
    pub provider_id: String,
    pub network_id: String,
    pub effective_date: DateTime<Utc>,
    pub termination_date: DateTime<Utc>,
    #[serde(default)]
    pub termination_reason: String,
}

impl NetworkMembership {
    /// A membership with no termination reason is still in effect.
    pub fn is_active(&self) -> bool {
        self.termination_reason.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLocation {
    pub provider_id: String,
    pub effective_date: DateTime<Utc>,
    pub termination_date: DateTime<Utc>,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    pub county: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ServiceLocation {
    pub fn is_active(&self) -> bool {
        self.termination_date.year() == ACTIVE_SENTINEL_YEAR
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyClaims {
    pub county: String,
    pub claims_count: i64,
    pub avg_claim_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyArea {
    pub county: String,
    pub area_sq_miles: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityTier {
    High,
    Medium,
    Low,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyStats {
    pub county: String,
    pub provider_count: usize,
    pub claims_count: i64,
    pub avg_claim_amount: f64,
    pub density: DensityTier,
    pub density_miles: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminatedAnalysisResult {
    pub term_network_count: usize,
    pub service_location_count: usize,
    pub percentage_terminated: f64,
    pub total_active_providers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: String,
    pub priority: Priority,
    pub county: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyDensity {
    pub name: String,
    pub count: usize,
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyDensityReport {
    pub specialty_densities: Vec<SpecialtyDensity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusAnalysis {
    pub county: String,
    pub radius: i64,
    pub network: String,
    pub provider_count: usize,
    pub specialty_count: usize,
    pub specialties: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_claim_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterRequest {
    #[serde(default = "all_specialties")]
    pub specialty: String,
    #[serde(default)]
    pub network: String,
}

/// Specialty filter value that matches every provider type.
pub const ALL_SPECIALTIES: &str = "All";

fn all_specialties() -> String {
    ALL_SPECIALTIES.to_string()
}
