//! Company and news filters.
//!
//! All filters are stable: output keeps input order and never re-sorts.
//! An empty result is a normal value; callers render it as "no matches".

use tracing::debug;

use crate::domain::{CompanyFilter, CompanyRecord, NewsArticle};

/// Apply explorer criteria (search AND sector AND risk) to `all`.
pub fn filter_companies(all: &[CompanyRecord], criteria: &CompanyFilter) -> Vec<CompanyRecord> {
    let needle = criteria.search_text.to_lowercase();
    let out: Vec<CompanyRecord> = all
        .iter()
        .filter(|c| matches_search(c, &needle))
        .filter(|c| criteria.sector.is_empty() || c.sector == criteria.sector)
        .filter(|c| matches_risk_exact(c, &criteria.risk_level))
        .cloned()
        .collect();

    debug!(input = all.len(), output = out.len(), ?criteria, "filtered companies");
    out
}

/// `needle` must already be lower-cased. Empty matches everything.
///
/// Each field is tested on its own (OR), never the concatenation, so a
/// needle spanning two fields does not match.
fn matches_search(c: &CompanyRecord, needle: &str) -> bool {
    needle.is_empty()
        || c.name.to_lowercase().contains(needle)
        || c.location.to_lowercase().contains(needle)
        || c.primary_products.to_lowercase().contains(needle)
}

/// Explorer risk rule: exact, case-sensitive equality; empty matches all.
///
/// Differs from [`crate::query::is_high_risk`] on purpose: "High" here does
/// not select "Medium-High".
pub fn matches_risk_exact(c: &CompanyRecord, risk_level: &str) -> bool {
    risk_level.is_empty() || c.risk_level == risk_level
}

/// Companies whose sector equals `sector` exactly.
pub fn companies_in_sector(all: &[CompanyRecord], sector: &str) -> Vec<CompanyRecord> {
    all.iter().filter(|c| c.sector == sector).cloned().collect()
}

/// News feed filter: empty sector returns everything in list order.
pub fn filter_news(all: &[NewsArticle], sector: &str) -> Vec<NewsArticle> {
    if sector.is_empty() {
        return all.to_vec();
    }
    all.iter().filter(|n| n.sector == sector).cloned().collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::{sample_companies, sample_news};
    use crate::query::test_support::arb_companies;

    fn criteria(search: &str, sector: &str, risk: &str) -> CompanyFilter {
        CompanyFilter {
            search_text: search.to_string(),
            sector: sector.to_string(),
            risk_level: risk.to_string(),
        }
    }

    #[test]
    fn chennai_matches_only_oilmax() {
        let out = filter_companies(&sample_companies(), &criteria("chennai", "", ""));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Oilmax Systems Pvt Ltd");
    }

    #[test]
    fn search_is_case_insensitive_over_products() {
        let out = filter_companies(&sample_companies(), &criteria("PRECISION PARTS", "", ""));
        let ids: Vec<&str> = out.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["MSME002", "MSME003"]);
    }

    #[test]
    fn search_does_not_span_fields() {
        // name ends "...Ltd", location starts "Ludhiana"; concatenation would match.
        let out = filter_companies(&sample_companies(), &criteria("ltdludhiana", "", ""));
        assert!(out.is_empty());
    }

    #[test]
    fn predicates_are_anded() {
        let out = filter_companies(&sample_companies(), &criteria("coimbatore", "Manufacturing", ""));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "MSME002");

        let out = filter_companies(&sample_companies(), &criteria("coimbatore", "Manufacturing", "Low"));
        assert!(out.is_empty());
    }

    #[test]
    fn sector_and_risk_are_case_sensitive() {
        assert!(filter_companies(&sample_companies(), &criteria("", "manufacturing", "")).is_empty());
        assert!(filter_companies(&sample_companies(), &criteria("", "", "low")).is_empty());
    }

    #[test]
    fn exact_risk_high_does_not_select_medium_high() {
        let out = filter_companies(&sample_companies(), &criteria("", "", "High"));
        assert!(out.is_empty());
        let out = filter_companies(&sample_companies(), &criteria("", "", "Medium-High"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn news_filter_by_sector() {
        let all = sample_news();
        assert_eq!(filter_news(&all, ""), all);

        let textiles = filter_news(&all, "Textiles");
        assert_eq!(textiles.len(), 1);
        assert!(textiles[0].title.starts_with("Textile Exports"));

        let general = filter_news(&all, "General");
        assert_eq!(general.len(), 2);
        assert!(general[0].date < general[1].date);
    }

    proptest! {
        #[test]
        fn default_criteria_is_identity(companies in arb_companies(0..20)) {
            let out = filter_companies(&companies, &CompanyFilter::default());
            prop_assert_eq!(out, companies);
        }

        #[test]
        fn output_is_ordered_subsequence(companies in arb_companies(0..20), search in "[a-c]{0,2}") {
            let out = filter_companies(&companies, &criteria(&search, "", ""));
            let mut it = companies.iter();
            for c in &out {
                prop_assert!(it.any(|x| x == c));
            }
        }
    }
}
