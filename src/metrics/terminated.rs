//! Network terminations within the trailing two-to-five-year window.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::metrics::county::active_provider_count;
use crate::models::{NetworkMembership, TerminatedAnalysisResult};
use crate::source::DataSource;

pub const LEFT_NETWORK_REASON: &str = "Left Network";

const WINDOW_MIN_YEARS: i32 = 2;
const WINDOW_MAX_YEARS: i32 = 5;

/// Open interval of termination dates that count as recent departures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TerminationWindow {
    pub fn trailing(now: DateTime<Utc>) -> Self {
        Self {
            start: years_before(now, WINDOW_MAX_YEARS),
            end: years_before(now, WINDOW_MIN_YEARS),
        }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t > self.start && t < self.end
    }
}

/// Same month and day `years` earlier, time of day kept. A Feb 29 that
/// lands in a common year rolls forward to Mar 1.
fn years_before(now: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    let today = now.date_naive();
    let year = today.year() - years;
    NaiveDate::from_ymd_opt(year, today.month(), today.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .map(|d| d.and_time(now.time()).and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn left_network_within(m: &NetworkMembership, window: &TerminationWindow) -> bool {
    m.termination_reason == LEFT_NETWORK_REASON && window.contains(m.termination_date)
}

pub fn terminated_network_count(
    source: &dyn DataSource,
    network: &str,
    window: &TerminationWindow,
) -> anyhow::Result<usize> {
    Ok(source
        .memberships()?
        .iter()
        .filter(|m| m.network_id == network && left_network_within(m, window))
        .count())
}

/// Service-location rows of recently departed providers whose own
/// termination also falls inside the window.
pub fn terminated_service_location_count(
    source: &dyn DataSource,
    network: &str,
    window: &TerminationWindow,
) -> anyhow::Result<usize> {
    let departed: HashSet<&str> = source
        .memberships()?
        .iter()
        .filter(|m| m.network_id == network && left_network_within(m, window))
        .map(|m| m.provider_id.as_str())
        .collect();

    Ok(source
        .service_locations()?
        .iter()
        .filter(|l| departed.contains(l.provider_id.as_str()) && window.contains(l.termination_date))
        .count())
}

pub fn terminated_network_analysis(
    source: &dyn DataSource,
    network: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<TerminatedAnalysisResult> {
    let window = TerminationWindow::trailing(now);
    let total_active = active_provider_count(source)?;
    let terminated = terminated_network_count(source, network, &window)?;
    let locations = terminated_service_location_count(source, network, &window)?;

    let percentage = if total_active == 0 {
        0.0
    } else {
        terminated as f64 / total_active as f64 * 100.0
    };

    Ok(TerminatedAnalysisResult {
        term_network_count: terminated,
        service_location_count: locations,
        percentage_terminated: percentage,
        total_active_providers: total_active,
    })
}

/// County view: the baseline is every active provider with an active service
/// location in the county. A provider with no membership row for the network
/// at all counts as terminated. The percentage divides by a fixed 100.
pub fn county_terminated_network_analysis(
    source: &dyn DataSource,
    county: &str,
    network: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<TerminatedAnalysisResult> {
    let window = TerminationWindow::trailing(now);
    let locations = source.service_locations()?;
    let memberships = source.memberships()?;

    let baseline: Vec<&str> = source
        .providers()?
        .iter()
        .filter(|p| p.is_active())
        .filter(|p| {
            locations
                .iter()
                .any(|l| l.provider_id == p.provider_id && l.county == county && l.is_active())
        })
        .map(|p| p.provider_id.as_str())
        .collect();

    let terminated = baseline
        .iter()
        .filter(|id| {
            match memberships
                .iter()
                .find(|m| m.provider_id == **id && m.network_id == network)
            {
                Some(m) => left_network_within(m, &window),
                None => true,
            }
        })
        .count();

    Ok(TerminatedAnalysisResult {
        term_network_count: terminated,
        service_location_count: 0,
        percentage_terminated: terminated as f64 / 100.0,
        total_active_providers: baseline.len(),
    })
}
