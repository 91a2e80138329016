use crate::geo::{Coordinate, mean_nearest_neighbor_miles};
use crate::models::{DensityTier, Provider, ServiceLocation};
use crate::source::DataSource;

pub fn classify_density(active_providers: usize) -> DensityTier {
    match active_providers {
        n if n >= 200 => DensityTier::High,
        n if n >= 50 => DensityTier::Medium,
        n if n >= 30 => DensityTier::Low,
        _ => DensityTier::Critical,
    }
}

/// First active location in `county` for each active provider homed there.
pub fn located_providers<'a>(
    providers: &'a [Provider],
    locations: &'a [ServiceLocation],
    county: &str,
) -> Vec<&'a ServiceLocation> {
    providers
        .iter()
        .filter(|p| p.county == county && p.is_active())
        .filter_map(|p| {
            locations.iter().find(|l| {
                l.provider_id == p.provider_id && l.county == county && l.is_active()
            })
        })
        .collect()
}

/// Human-readable spacing of a county's active providers.
///
/// Uses real coordinates when at least two providers have an active location
/// in the county, otherwise estimates from the county area.
pub fn density_distance(
    source: &dyn DataSource,
    county: &str,
    active_providers: usize,
) -> anyhow::Result<String> {
    if active_providers == 0 {
        return Ok("No providers".to_string());
    }

    let located = located_providers(source.providers()?, source.service_locations()?, county);
    let points: Vec<Coordinate> = located
        .iter()
        .map(|l| Coordinate::new(l.latitude, l.longitude))
        .collect();

    let avg = mean_nearest_neighbor_miles(&points);
    if avg > 0.0 {
        return Ok(format!("~{avg:.1} mi apart"));
    }

    Ok(area_spacing(active_providers, source.county_area(county)))
}

/// Area-based estimate. Below one provider per square mile, reports the side
/// of the square each provider would occupy.
pub fn area_spacing(active_providers: usize, area_sq_miles: f64) -> String {
    if active_providers == 0 {
        return "No providers".to_string();
    }
    let per_sq_mile = active_providers as f64 / area_sq_miles;
    if per_sq_mile >= 1.0 {
        format!("{per_sq_mile:.1}/sq mi")
    } else {
        let spacing = (area_sq_miles / active_providers as f64).sqrt();
        format!("~{spacing:.1} mi apart")
    }
}
