//! Ordered rules that turn one county's figures into action items.

use std::collections::HashSet;

use crate::models::{CountyStats, Priority, Provider, Recommendation, STATUS_TERMINATED};

/// Inputs every rule reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountyFacts {
    pub provider_count: usize,
    pub claims_count: i64,
    pub avg_claim_amount: f64,
    pub terminated_providers: usize,
    pub distinct_specialties: usize,
}

impl CountyFacts {
    /// `providers` are every provider homed in the county, in any status.
    pub fn gather<'a>(stats: &CountyStats, providers: impl IntoIterator<Item = &'a Provider>) -> Self {
        let mut terminated_providers = 0;
        let mut specialties = HashSet::new();
        for p in providers {
            if p.status == STATUS_TERMINATED {
                terminated_providers += 1;
            }
            specialties.insert(p.provider_type.as_str());
        }

        Self {
            provider_count: stats.provider_count,
            claims_count: stats.claims_count,
            avg_claim_amount: stats.avg_claim_amount,
            terminated_providers,
            distinct_specialties: specialties.len(),
        }
    }

    /// `None` when the county has no active providers.
    pub fn claims_per_provider(&self) -> Option<f64> {
        (self.provider_count > 0).then(|| self.claims_count as f64 / self.provider_count as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: &'static str,
    pub title: &'static str,
    pub description: String,
    pub priority: Priority,
    pub icon: &'static str,
}

pub struct Rule {
    pub applies: fn(&CountyFacts) -> bool,
    pub build: fn(&CountyFacts) -> Finding,
}

/// Rules in evaluation order. Each is independent of the others.
pub fn rules() -> [Rule; 7] {
    [
        Rule {
            applies: |f| f.provider_count < 15,
            build: |f| Finding {
                kind: "EXPAND_NETWORK",
                title: "Critical Provider Shortage",
                description: format!(
                    "Only {} providers for {} claims - urgent expansion needed",
                    f.provider_count, f.claims_count
                ),
                priority: Priority::High,
                icon: "mdi-alert-circle",
            },
        },
        Rule {
            applies: |f| f.claims_per_provider().is_some_and(|r| r > 25.0),
            build: |f| Finding {
                kind: "EXPAND_NETWORK",
                title: "High Provider Workload",
                description: format!(
                    "{:.0} claims per provider - consider network expansion",
                    f.claims_per_provider().unwrap_or_default()
                ),
                priority: Priority::Medium,
                icon: "mdi-chart-line",
            },
        },
        Rule {
            applies: |f| f.avg_claim_amount > 1000.0,
            build: |f| Finding {
                kind: "COST_MANAGEMENT",
                title: "High Cost Claims",
                description: format!(
                    "Average claim ${:.2} - review cost management strategies",
                    f.avg_claim_amount
                ),
                priority: Priority::Medium,
                icon: "mdi-currency-usd",
            },
        },
        Rule {
            applies: |f| f.terminated_providers > 0,
            build: |f| Finding {
                kind: "CONTACT_FORMER",
                title: "Contact Former Providers",
                description: format!(
                    "{} providers left network - consider re-engagement",
                    f.terminated_providers
                ),
                priority: Priority::Medium,
                icon: "mdi-phone",
            },
        },
        Rule {
            applies: |f| f.distinct_specialties < 5 && f.provider_count > 10,
            build: |f| Finding {
                kind: "EXPAND_SPECIALTIES",
                title: "Limited Specialty Coverage",
                description: format!(
                    "Only {} specialties available - expand specialty network",
                    f.distinct_specialties
                ),
                priority: Priority::Medium,
                icon: "mdi-medical-bag",
            },
        },
        Rule {
            applies: |f| f.claims_count > 500 && f.provider_count < 50,
            build: |f| Finding {
                kind: "TARGET_OON",
                title: "Target Out-of-Network Providers",
                description: format!(
                    "{} potential providers serving this area",
                    f.claims_count / 100
                ),
                priority: Priority::Medium,
                icon: "mdi-target",
            },
        },
        Rule {
            applies: |f| {
                f.provider_count > 100 && f.claims_per_provider().is_some_and(|r| r < 20.0)
            },
            build: |_| Finding {
                kind: "OPTIMIZE_NETWORK",
                title: "Network Optimization Opportunity",
                description: "Low utilization per provider - consider network optimization"
                    .to_string(),
                priority: Priority::Low,
                icon: "mdi-tune",
            },
        },
    ]
}

/// Runs every rule; IDs count up from 1 within this call.
pub fn generate(county: &str, facts: &CountyFacts) -> Vec<Recommendation> {
    rules()
        .iter()
        .filter(|rule| (rule.applies)(facts))
        .zip(1..)
        .map(|(rule, id)| {
            let finding = (rule.build)(facts);
            Recommendation {
                id,
                kind: finding.kind,
                title: finding.title,
                description: finding.description,
                priority: finding.priority,
                county: county.to_string(),
                icon: finding.icon,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::DensityTier;

    fn facts(provider_count: usize, claims_count: i64, avg: f64) -> CountyFacts {
        CountyFacts {
            provider_count,
            claims_count,
            avg_claim_amount: avg,
            terminated_providers: 0,
            distinct_specialties: 10,
        }
    }

    fn fires(index: usize, f: &CountyFacts) -> bool {
        (rules()[index].applies)(f)
    }

    #[test]
    fn shortage_below_fifteen() {
        assert!(fires(0, &facts(14, 0, 0.0)));
        assert!(!fires(0, &facts(15, 0, 0.0)));
        let finding = (rules()[0].build)(&facts(3, 5000, 0.0));
        assert_eq!(finding.priority, Priority::High);
        assert_eq!(
            finding.description,
            "Only 3 providers for 5000 claims - urgent expansion needed"
        );
    }

    #[test]
    fn workload_is_silent_without_providers() {
        let empty = facts(0, 10_000, 0.0);
        assert_eq!(empty.claims_per_provider(), None);
        assert!(!fires(1, &empty));
        assert!(!fires(6, &empty));
    }

    #[test]
    fn workload_above_twenty_five() {
        assert!(fires(1, &facts(4, 101, 0.0)));
        assert!(!fires(1, &facts(4, 100, 0.0)));
        let finding = (rules()[1].build)(&facts(3, 5000, 0.0));
        assert_eq!(
            finding.description,
            "1667 claims per provider - consider network expansion"
        );
    }

    #[test]
    fn high_cost_above_one_thousand() {
        assert!(fires(2, &facts(20, 0, 1000.01)));
        assert!(!fires(2, &facts(20, 0, 1000.0)));
        let finding = (rules()[2].build)(&facts(20, 0, 1234.5));
        assert_eq!(
            finding.description,
            "Average claim $1234.50 - review cost management strategies"
        );
    }

    #[test]
    fn contact_former_when_any_terminated() {
        let mut f = facts(20, 0, 0.0);
        assert!(!fires(3, &f));
        f.terminated_providers = 2;
        assert!(fires(3, &f));
    }

    #[test]
    fn limited_specialties_needs_more_than_ten_providers() {
        let mut f = facts(11, 0, 0.0);
        f.distinct_specialties = 4;
        assert!(fires(4, &f));
        f.provider_count = 10;
        assert!(!fires(4, &f));
        f.provider_count = 11;
        f.distinct_specialties = 5;
        assert!(!fires(4, &f));
    }

    #[test]
    fn out_of_network_estimate_truncates() {
        assert!(fires(5, &facts(49, 501, 0.0)));
        assert!(!fires(5, &facts(50, 501, 0.0)));
        assert!(!fires(5, &facts(10, 500, 0.0)));
        let finding = (rules()[5].build)(&facts(10, 1299, 0.0));
        assert_eq!(finding.description, "12 potential providers serving this area");
    }

    #[test]
    fn optimization_for_large_underused_networks() {
        assert!(fires(6, &facts(101, 1000, 0.0)));
        assert!(!fires(6, &facts(100, 1000, 0.0)));
        assert!(!fires(6, &facts(101, 2020, 0.0)));
        assert_eq!((rules()[6].build)(&facts(101, 0, 0.0)).priority, Priority::Low);
    }

    #[test]
    fn ids_are_sequential_over_fired_rules() {
        let mut f = facts(3, 5000, 250.50);
        f.terminated_providers = 1;
        f.distinct_specialties = 2;
        let recs = generate("Sedgwick", &f);

        let kinds: Vec<&str> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            ["EXPAND_NETWORK", "EXPAND_NETWORK", "CONTACT_FORMER", "TARGET_OON"]
        );
        let ids: Vec<u32> = recs.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert!(recs.iter().all(|r| r.county == "Sedgwick"));
    }

    #[test]
    fn nothing_fires_for_a_healthy_county() {
        let f = facts(60, 1300, 180.0);
        assert!(generate("Johnson", &f).is_empty());
    }

    #[test]
    fn gather_counts_terminated_and_specialties() {
        let tables = fixtures::tables();
        let stats = CountyStats {
            county: "Sedgwick".into(),
            provider_count: 3,
            claims_count: 5000,
            avg_claim_amount: 250.50,
            density: DensityTier::Critical,
            density_miles: String::new(),
        };
        let f = CountyFacts::gather(
            &stats,
            tables.providers.iter().filter(|p| p.county == "Sedgwick"),
        );
        assert_eq!(f.terminated_providers, 1);
        assert_eq!(f.distinct_specialties, 2);
        assert_eq!(f.provider_count, 3);
    }
}
