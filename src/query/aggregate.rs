//! Sector grouping, growth ranking, risk buckets, and portfolio totals.
//!
//! Every function is a single O(n) pass (plus a sort for rankings) over the
//! records it is given; nothing is cached.

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::{
    CompanyRecord, HeaderStats, RISK_HIGH_MARKER, RISK_LOW, RISK_MEDIUM, RiskBuckets,
    SectorAggregate, SectorSeriesPoint, Totals,
};

/// Group records by sector. Keys keep first-appearance order.
pub fn group_by_sector(records: &[CompanyRecord]) -> IndexMap<String, SectorAggregate> {
    let mut groups: IndexMap<String, SectorAggregate> = IndexMap::new();
    for c in records {
        let agg = groups
            .entry(c.sector.clone())
            .or_insert_with(|| SectorAggregate {
                sector: c.sector.clone(),
                count: 0,
                total_revenue: 0.0,
                total_growth: 0.0,
                total_margin: 0.0,
            });
        agg.count += 1;
        agg.total_revenue += c.revenue_2024;
        agg.total_growth += c.growth_rate;
        agg.total_margin += c.profit_margin;
    }
    debug!(records = records.len(), sectors = groups.len(), "grouped by sector");
    groups
}

/// Top `k` records by growth rate, descending. Ties keep input order.
pub fn top_by_growth(records: &[CompanyRecord], k: usize) -> Vec<CompanyRecord> {
    let mut sorted = records.to_vec();
    // `sort_by` is stable, which is what keeps tied records in input order.
    sorted.sort_by(|a, b| b.growth_rate.total_cmp(&a.growth_rate));
    sorted.truncate(k);
    sorted
}

/// Risk-report rule: any level containing "High" (case-sensitive).
///
/// Unlike the explorer's exact match, this groups "Medium-High" with "High".
pub fn is_high_risk(c: &CompanyRecord) -> bool {
    c.risk_level.contains(RISK_HIGH_MARKER)
}

/// Split records into low / medium / high buckets.
///
/// Not a partition: unanticipated levels (e.g. "Unknown") appear nowhere.
/// Use [`unclassified_risk`] to list them.
pub fn bucket_by_risk(records: &[CompanyRecord]) -> RiskBuckets {
    let mut buckets = RiskBuckets::default();
    for c in records {
        if c.risk_level == RISK_LOW {
            buckets.low.push(c.clone());
        }
        if c.risk_level == RISK_MEDIUM {
            buckets.medium.push(c.clone());
        }
        if is_high_risk(c) {
            buckets.high.push(c.clone());
        }
    }
    buckets
}

/// Records that [`bucket_by_risk`] leaves out.
pub fn unclassified_risk(records: &[CompanyRecord]) -> Vec<CompanyRecord> {
    records
        .iter()
        .filter(|c| c.risk_level != RISK_LOW && c.risk_level != RISK_MEDIUM && !is_high_risk(c))
        .cloned()
        .collect()
}

/// Total revenue plus mean growth and margin; `None` for an empty slice.
pub fn totals(records: &[CompanyRecord]) -> Option<Totals> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let total_revenue = records.iter().map(|c| c.revenue_2024).sum();
    let avg_growth = records.iter().map(|c| c.growth_rate).sum::<f64>() / n;
    let avg_margin = records.iter().map(|c| c.profit_margin).sum::<f64>() / n;
    Some(Totals {
        total_revenue,
        avg_growth,
        avg_margin,
    })
}

/// Sectors ordered by mean growth, highest first. Ties keep group order.
pub fn rank_sectors_by_growth(groups: &IndexMap<String, SectorAggregate>) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = groups
        .values()
        .map(|g| (g.sector.clone(), g.avg_growth()))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Header numbers. An empty slice yields zeros rather than NaN.
pub fn header_stats(records: &[CompanyRecord]) -> HeaderStats {
    let (total_revenue, avg_growth) = match totals(records) {
        Some(t) => (t.total_revenue, t.avg_growth),
        None => (0.0, 0.0),
    };
    HeaderStats {
        company_count: records.len(),
        avg_growth,
        total_revenue,
        total_revenue_billions: total_revenue / 1000.0,
    }
}

/// Chart data: per-sector count, revenue, and mean growth.
pub fn sector_series(records: &[CompanyRecord]) -> Vec<SectorSeriesPoint> {
    group_by_sector(records)
        .into_values()
        .map(|g| SectorSeriesPoint {
            avg_growth: g.avg_growth(),
            sector: g.sector,
            count: g.count,
            total_revenue: g.total_revenue,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::sample_companies;
    use crate::query::test_support::{arb_companies, company_with};

    #[test]
    fn manufacturing_average_growth() {
        let groups = group_by_sector(&sample_companies());
        let mfg = &groups["Manufacturing"];
        assert_eq!(mfg.count, 3);
        let expected = (27.3 + 25.3 + 35.8) / 3.0;
        assert!((mfg.avg_growth() - expected).abs() < 1e-6);
        assert!((mfg.avg_growth() - 29.466_666).abs() < 1e-5);
    }

    #[test]
    fn group_keys_follow_first_appearance() {
        let groups = group_by_sector(&sample_companies());
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["Manufacturing", "Food Processing", "Technology", "Healthcare", "Textiles"]
        );
    }

    #[test]
    fn top_by_growth_on_sample() {
        let top = top_by_growth(&sample_companies(), 3);
        let ids: Vec<&str> = top.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["MSME021", "MSME031", "MSME011"]);
    }

    #[test]
    fn top_by_growth_returns_all_when_short() {
        assert_eq!(top_by_growth(&sample_companies(), 100).len(), 8);
        assert!(top_by_growth(&[], 5).is_empty());
    }

    #[test]
    fn top_by_growth_keeps_ties_in_input_order() {
        let records = vec![
            company_with("A", "S", "Low", 10.0),
            company_with("B", "S", "Low", 20.0),
            company_with("C", "S", "Low", 10.0),
            company_with("D", "S", "Low", -5.0),
        ];
        let ids: Vec<String> = top_by_growth(&records, 4).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn risk_buckets_on_sample() {
        let buckets = bucket_by_risk(&sample_companies());
        assert_eq!(buckets.low.len(), 5);
        assert_eq!(buckets.medium.len(), 2);
        assert_eq!(buckets.high.len(), 1);
        assert_eq!(buckets.high[0].risk_level, "Medium-High");
    }

    #[test]
    fn unknown_risk_lands_in_no_bucket() {
        let records = vec![
            company_with("A", "S", "Unknown", 1.0),
            company_with("B", "S", "High", 1.0),
        ];
        let buckets = bucket_by_risk(&records);
        assert!(buckets.low.is_empty());
        assert!(buckets.medium.is_empty());
        assert_eq!(buckets.high.len(), 1);
        assert_eq!(buckets.classified_len(), 1);

        let missing = unclassified_risk(&records);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, "A");
    }

    #[test]
    fn high_marker_is_case_sensitive() {
        let buckets = bucket_by_risk(&[company_with("A", "S", "medium-high", 1.0)]);
        assert_eq!(buckets.classified_len(), 0);
    }

    #[test]
    fn totals_on_sample_and_empty() {
        let t = totals(&sample_companies()).unwrap();
        assert!((t.total_revenue - 808.27).abs() < 1e-9);
        assert!(totals(&[]).is_none());
    }

    #[test]
    fn header_stats_on_sample() {
        let stats = header_stats(&sample_companies());
        assert_eq!(stats.company_count, 8);
        assert!((stats.total_revenue_billions - 0.80827).abs() < 1e-9);
        assert_eq!(format!("{:.1}", stats.avg_growth), "38.8");

        let empty = header_stats(&[]);
        assert_eq!(empty.company_count, 0);
        assert_eq!(empty.avg_growth, 0.0);
    }

    #[test]
    fn sectors_ranked_by_average_growth() {
        let ranked = rank_sectors_by_growth(&group_by_sector(&sample_companies()));
        let names: Vec<&str> = ranked.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(
            names,
            vec!["Technology", "Healthcare", "Food Processing", "Manufacturing", "Textiles"]
        );
    }

    #[test]
    fn sector_series_matches_groups() {
        let series = sector_series(&sample_companies());
        assert_eq!(series.len(), 5);
        let food = series.iter().find(|p| p.sector == "Food Processing").unwrap();
        assert_eq!(food.count, 2);
        assert!((food.total_revenue - (189.45 + 156.78)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn group_counts_cover_every_record(companies in arb_companies(1..30)) {
            let groups = group_by_sector(&companies);
            let total: usize = groups.values().map(|g| g.count).sum();
            prop_assert_eq!(total, companies.len());
            for c in &companies {
                prop_assert!(groups.contains_key(&c.sector));
            }
            prop_assert!(groups.values().all(|g| g.count >= 1));
        }

        #[test]
        fn top_by_growth_sorted_and_stable(companies in arb_companies(0..30), k in 0usize..40) {
            let top = top_by_growth(&companies, k);
            prop_assert_eq!(top.len(), k.min(companies.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].growth_rate >= pair[1].growth_rate);
                if pair[0].growth_rate == pair[1].growth_rate {
                    let pos = |id: &str| companies.iter().position(|c| c.id == id);
                    prop_assert!(pos(&pair[0].id) < pos(&pair[1].id));
                }
            }
        }
    }
}
