use std::collections::{BTreeMap, HashSet};

use crate::models::{ALL_SPECIALTIES, NetworkMembership, Provider, RadiusAnalysis};
use crate::source::DataSource;

/// Providers holding a membership in `network` that has not been terminated.
pub fn active_members<'a>(memberships: &'a [NetworkMembership], network: &str) -> HashSet<&'a str> {
    memberships
        .iter()
        .filter(|m| m.network_id == network && m.is_active())
        .map(|m| m.provider_id.as_str())
        .collect()
}

/// Active in-network providers, optionally narrowed to one specialty.
pub fn filtered_providers(
    source: &dyn DataSource,
    specialty: &str,
    network: &str,
) -> anyhow::Result<Vec<Provider>> {
    let members = active_members(source.memberships()?, network);
    Ok(source
        .providers()?
        .iter()
        .filter(|p| p.is_active() && members.contains(p.provider_id.as_str()))
        .filter(|p| specialty == ALL_SPECIALTIES || p.provider_type == specialty)
        .cloned()
        .collect())
}

/// In-network provider mix for a county. `radius` is reported back but does
/// not restrict providers by distance.
pub fn radius_analysis(
    source: &dyn DataSource,
    county: &str,
    radius: i64,
    network: &str,
) -> anyhow::Result<RadiusAnalysis> {
    let members = active_members(source.memberships()?, network);

    let mut provider_count = 0;
    let mut specialties: BTreeMap<String, usize> = BTreeMap::new();
    for p in source.providers()?.iter().filter(|p| {
        p.county == county && p.is_active() && members.contains(p.provider_id.as_str())
    }) {
        provider_count += 1;
        *specialties.entry(p.provider_type.clone()).or_default() += 1;
    }

    let claims = source.county_claims()?.iter().find(|c| c.county == county);

    Ok(RadiusAnalysis {
        county: county.to_string(),
        radius,
        network: network.to_string(),
        provider_count,
        specialty_count: specialties.len(),
        specialties,
        claims_count: claims.map(|c| c.claims_count),
        avg_claim_amount: claims.map(|c| c.avg_claim_amount),
    })
}
