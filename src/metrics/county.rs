use std::collections::HashMap;

use crate::metrics::density::{classify_density, density_distance};
use crate::models::{CountyClaims, CountyStats, Provider};
use crate::source::DataSource;

pub fn active_provider_count(source: &dyn DataSource) -> anyhow::Result<usize> {
    Ok(source.providers()?.iter().filter(|p| p.is_active()).count())
}

/// Providers whose home county is `county`, in any status.
pub fn providers_in_county<'a>(providers: &'a [Provider], county: &str) -> Vec<&'a Provider> {
    providers.iter().filter(|p| p.county == county).collect()
}

/// One row per county that has claims data, in claims order.
pub fn county_stats(source: &dyn DataSource) -> anyhow::Result<Vec<CountyStats>> {
    let mut active_by_county: HashMap<&str, usize> = HashMap::new();
    for p in source.providers()?.iter().filter(|p| p.is_active()) {
        *active_by_county.entry(p.county.as_str()).or_default() += 1;
    }

    source
        .county_claims()?
        .iter()
        .map(|claims| {
            let count = active_by_county
                .get(claims.county.as_str())
                .copied()
                .unwrap_or(0);
            build_stats(source, claims, count)
        })
        .collect()
}

/// `None` when the county has no claims row.
pub fn county_stats_for(
    source: &dyn DataSource,
    county: &str,
) -> anyhow::Result<Option<CountyStats>> {
    let Some(claims) = source.county_claims()?.iter().find(|c| c.county == county) else {
        return Ok(None);
    };
    let count = source
        .providers()?
        .iter()
        .filter(|p| p.county == county && p.is_active())
        .count();
    build_stats(source, claims, count).map(Some)
}

fn build_stats(
    source: &dyn DataSource,
    claims: &CountyClaims,
    active_providers: usize,
) -> anyhow::Result<CountyStats> {
    Ok(CountyStats {
        county: claims.county.clone(),
        provider_count: active_providers,
        claims_count: claims.claims_count,
        avg_claim_amount: claims.avg_claim_amount,
        density: classify_density(active_providers),
        density_miles: density_distance(source, &claims.county, active_providers)?,
    })
}
