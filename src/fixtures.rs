//! Shared test data: a handful of Kansas counties with known answers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{CountyArea, CountyClaims, NetworkMembership, Provider, ServiceLocation};
use crate::query::Analytics;
use crate::source::{Snapshot, Tables};

/// Fixed query time. The termination window is (2020-06-01, 2023-06-01).
pub fn now() -> DateTime<Utc> {
    date(2025, 6, 1)
}

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn active_until() -> DateTime<Utc> {
    date(9999, 12, 31)
}

pub fn provider(id: &str, specialty: &str, status: &str, county: &str) -> Provider {
    Provider {
        provider_id: id.into(),
        npi: format!("10000000{id:0>2}"),
        provider_type: specialty.into(),
        status: status.into(),
        county: county.into(),
    }
}

pub fn membership(
    provider_id: &str,
    network: &str,
    terminated: DateTime<Utc>,
    reason: &str,
) -> NetworkMembership {
    NetworkMembership {
        provider_id: provider_id.into(),
        network_id: network.into(),
        effective_date: date(2015, 1, 1),
        termination_date: terminated,
        termination_reason: reason.into(),
    }
}

pub fn location(
    provider_id: &str,
    county: &str,
    terminated: DateTime<Utc>,
    lat: f64,
    lon: f64,
) -> ServiceLocation {
    ServiceLocation {
        provider_id: provider_id.into(),
        effective_date: date(2015, 1, 1),
        termination_date: terminated,
        address1: format!("{provider_id} Main St"),
        address2: String::new(),
        city: String::new(),
        zip_code: String::new(),
        county: county.into(),
        latitude: lat,
        longitude: lon,
    }
}

pub fn claims(county: &str, count: i64, avg: f64) -> CountyClaims {
    CountyClaims {
        county: county.into(),
        claims_count: count,
        avg_claim_amount: avg,
    }
}

/// Sedgwick: providers 1-3 active with active locations, 4 terminated.
/// Johnson: provider 5, one location. Greeley: provider 6, no locations.
/// Wallace: claims only.
pub fn tables() -> Tables {
    let providers = vec![
        provider("1", "Primary Care", "Active", "Sedgwick"),
        provider("2", "Cardiology", "Active", "Sedgwick"),
        provider("3", "Primary Care", "Active", "Sedgwick"),
        provider("4", "Cardiology", "Terminated", "Sedgwick"),
        provider("5", "Pediatrics", "Active", "Johnson"),
        provider("6", "Primary Care", "Active", "Greeley"),
    ];

    let memberships = vec![
        membership("1", "Commercial", active_until(), ""),
        membership("1", "Medicare", active_until(), ""),
        membership("2", "Commercial", date(2021, 3, 15), "Left Network"),
        membership("3", "Medicare", active_until(), ""),
        membership("4", "Commercial", date(2022, 1, 10), "Left Network"),
        membership("5", "Commercial", date(2024, 2, 1), "Left Network"),
        membership("6", "Commercial", active_until(), ""),
    ];

    let service_locations = vec![
        location("1", "Sedgwick", active_until(), 37.6872, -97.3301),
        location("2", "Sedgwick", active_until(), 37.6922, -97.3375),
        location("2", "Sedgwick", date(2021, 3, 15), 37.6500, -97.4000),
        location("3", "Sedgwick", active_until(), 37.7528, -97.2483),
        location("4", "Sedgwick", date(2022, 1, 10), 37.6900, -97.3400),
        location("4", "Sedgwick", date(2019, 5, 1), 37.6900, -97.3400),
        location("5", "Johnson", active_until(), 38.8814, -94.8191),
    ];

    let county_claims = vec![
        claims("Sedgwick", 5000, 250.50),
        claims("Johnson", 4000, 300.00),
        claims("Greeley", 120, 1100.00),
        claims("Wallace", 40, 90.00),
    ];

    let county_areas = vec![
        CountyArea {
            county: "Sedgwick".into(),
            area_sq_miles: 1008.0,
        },
        CountyArea {
            county: "Johnson".into(),
            area_sq_miles: 480.0,
        },
    ];

    let specialty_standards = BTreeMap::from([
        ("Cardiology".to_string(), 0.01),
        ("Oncology".to_string(), 0.005),
        ("Pediatrics".to_string(), 0.02),
        ("Primary Care".to_string(), 0.05),
    ]);

    Tables {
        providers,
        memberships,
        service_locations,
        county_claims,
        county_areas,
        specialty_standards,
    }
}

pub fn snapshot(tables: Tables) -> Snapshot {
    Snapshot::new(tables)
}

pub fn analytics() -> Analytics<Snapshot> {
    Analytics::new(Arc::new(snapshot(tables()))).with_clock(now)
}
