use std::collections::HashMap;

use crate::models::{SpecialtyDensity, SpecialtyDensityReport};
use crate::source::DataSource;

/// Gap between recommended and actual provider density for every standard
/// specialty, largest unmet need first.
pub fn specialty_density(
    source: &dyn DataSource,
    county: &str,
) -> anyhow::Result<SpecialtyDensityReport> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in source
        .providers()?
        .iter()
        .filter(|p| p.county == county && p.is_active())
    {
        *counts.entry(p.provider_type.as_str()).or_default() += 1;
    }

    let area = source.county_area(county);
    let mut densities: Vec<SpecialtyDensity> = source
        .specialty_standards()?
        .iter()
        .map(|(name, recommended)| {
            let count = counts.get(name.as_str()).copied().unwrap_or(0);
            SpecialtyDensity {
                name: name.clone(),
                count,
                gap: recommended - count as f64 / area,
            }
        })
        .collect();

    // Stable, so equal gaps keep the standards' key order.
    densities.sort_by(|a, b| b.gap.total_cmp(&a.gap));

    Ok(SpecialtyDensityReport {
        specialty_densities: densities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn ranks_by_gap_descending() {
        let snapshot = fixtures::snapshot(fixtures::tables());
        let report = specialty_density(&snapshot, "Sedgwick").unwrap();
        let names: Vec<&str> = report
            .specialty_densities
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["Primary Care", "Pediatrics", "Cardiology", "Oncology"]);

        let primary = &report.specialty_densities[0];
        assert_eq!(primary.count, 2);
        assert!((primary.gap - (0.05 - 2.0 / 1008.0)).abs() < 1e-12);

        // The terminated cardiologist does not count.
        assert_eq!(report.specialty_densities[2].count, 1);
    }

    #[test]
    fn every_standard_is_reported_and_sorted() {
        let snapshot = fixtures::snapshot(fixtures::tables());
        for county in ["Sedgwick", "Johnson", "Greeley", "Nowhere"] {
            let report = specialty_density(&snapshot, county).unwrap();
            assert_eq!(report.specialty_densities.len(), 4);
            assert!(
                report
                    .specialty_densities
                    .windows(2)
                    .all(|w| w[0].gap >= w[1].gap)
            );
        }
    }

    #[test]
    fn equal_gaps_keep_key_order() {
        let mut tables = fixtures::tables();
        tables.specialty_standards = [("Urology", 0.01), ("Dermatology", 0.01), ("Allergy", 0.01)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let snapshot = fixtures::snapshot(tables);
        let report = specialty_density(&snapshot, "Wallace").unwrap();
        let names: Vec<&str> = report
            .specialty_densities
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["Allergy", "Dermatology", "Urology"]);
    }
}
