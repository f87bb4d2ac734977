//! Shared "answer a question" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! classify -> select data (filter/aggregate) -> shape response
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::{debug, info};

use crate::data::Dataset;
use crate::domain::{CompanyFilter, CompanyRecord, EngineConfig, NewsArticle, Sentiment};
use crate::query::{
    QUICK_QUERIES, bucket_by_risk, companies_in_sector, filter_companies, filter_news,
    group_by_sector, header_stats, rank_sectors_by_growth, top_by_growth, totals,
    unclassified_risk, Intent,
};
use crate::report::response::{self, Answer, Response};

/// Classify `query` and build its answer.
pub fn answer(dataset: &Dataset, query: &str, config: &EngineConfig) -> Answer {
    let intent = Intent::classify(query);
    info!(?intent, "routed query");
    Answer {
        query: query.trim().to_string(),
        intent,
        response: respond(intent, dataset, config),
    }
}

/// Same as [`answer`], after sleeping for `config.think_delay`.
pub fn answer_with_delay(dataset: &Dataset, query: &str, config: &EngineConfig) -> Answer {
    if !config.think_delay.is_zero() {
        debug!(delay_ms = config.think_delay.as_millis() as u64, "simulated thinking");
        std::thread::sleep(config.think_delay);
    }
    answer(dataset, query, config)
}

/// Select the data an intent needs and shape it.
pub fn respond(intent: Intent, dataset: &Dataset, config: &EngineConfig) -> Response {
    let companies = dataset.companies();
    match intent {
        Intent::ManufacturingSummary
        | Intent::HealthcareSummary
        | Intent::TechnologySummary
        | Intent::FoodProcessingTrends => {
            // `sector()` is Some for every arm above.
            let sector = intent.sector().unwrap_or_default();
            let members = companies_in_sector(companies, sector);
            let groups = group_by_sector(&members);
            let headlines = filter_news(dataset.news(), sector);
            let index = sector_index_symbol(sector)
                .and_then(|symbol| dataset.index(symbol))
                .cloned();
            response::sector_summary(intent, sector, members, groups.get(sector), headlines, index)
        }
        Intent::RiskAnalysis => {
            response::risk_report(bucket_by_risk(companies), unclassified_risk(companies))
        }
        Intent::HighGrowth => {
            let ranked = top_by_growth(companies, config.top_growth);
            let avg_growth = totals(&ranked).map(|t| t.avg_growth);
            response::growth_report(ranked, avg_growth)
        }
        Intent::MarketFinancial => {
            let headwinds = dataset
                .news()
                .iter()
                .filter(|n| n.sentiment == Sentiment::Negative)
                .cloned()
                .collect();
            response::market_report(dataset.indices().to_vec(), totals(companies), headwinds)
        }
        Intent::SectorComparison => {
            let groups = group_by_sector(companies);
            let ranking = rank_sectors_by_growth(&groups);
            response::sector_comparison(groups.into_values().collect(), ranking)
        }
        Intent::Default => response::overview(
            dataset.sectors(),
            QUICK_QUERIES.iter().take(3).map(|(_, q)| q.to_string()).collect(),
            header_stats(companies),
        ),
    }
}

/// Index quote that accompanies a sector summary, if the sector has one.
fn sector_index_symbol(sector: &str) -> Option<&'static str> {
    match sector {
        "Healthcare" => Some("HEALTHCARE_INDEX"),
        _ => None,
    }
}

/// Explorer grid rows for `criteria`.
pub fn explore(dataset: &Dataset, criteria: &CompanyFilter) -> Vec<CompanyRecord> {
    filter_companies(dataset.companies(), criteria)
}

/// News feed rows for `sector` (empty = all).
pub fn news_feed(dataset: &Dataset, sector: &str) -> Vec<NewsArticle> {
    filter_news(dataset.news(), sector)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::report::response::SectorSummary;

    fn dataset() -> Dataset {
        Dataset::embedded().unwrap()
    }

    fn summary(r: Response) -> SectorSummary {
        match r {
            Response::SectorSummary(s) => s,
            other => panic!("expected sector summary, got {other:?}"),
        }
    }

    #[test]
    fn manufacturing_summary_carries_averages_and_news() {
        let a = answer(&dataset(), "Show me manufacturing companies", &EngineConfig::default());
        assert_eq!(a.intent, Intent::ManufacturingSummary);
        let s = summary(a.response);
        assert_eq!(s.companies.len(), 3);
        let avg = s.averages.unwrap();
        assert!((avg.growth - (27.3 + 25.3 + 35.8) / 3.0).abs() < 1e-6);
        assert!((avg.revenue - (122.16 + 26.53 + 45.78) / 3.0).abs() < 1e-6);
        assert!(s.index.is_none());
        assert_eq!(s.headlines.len(), 1);
    }

    #[test]
    fn only_healthcare_summary_quotes_an_index() {
        let ds = dataset();
        let config = EngineConfig::default();
        let s = summary(respond(Intent::HealthcareSummary, &ds, &config));
        assert_eq!(s.index.unwrap().symbol, "HEALTHCARE_INDEX");
        for intent in [Intent::ManufacturingSummary, Intent::TechnologySummary, Intent::FoodProcessingTrends] {
            assert!(summary(respond(intent, &ds, &config)).index.is_none(), "{intent:?}");
        }
    }

    #[test]
    fn food_trends_summary() {
        let a = answer(&dataset(), "Tell me about food processing trends", &EngineConfig::default());
        assert_eq!(a.intent, Intent::FoodProcessingTrends);
        let s = summary(a.response);
        let names: Vec<&str> = s.companies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Suguna Foods Pvt Ltd", "MTR Foods Pvt Ltd"]);
        assert!(s.index.is_none());
    }

    #[test]
    fn missing_sector_yields_empty_summary() {
        let ds = Dataset::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        let s = summary(respond(Intent::HealthcareSummary, &ds, &EngineConfig::default()));
        assert!(s.companies.is_empty());
        assert!(s.averages.is_none());
        assert!(s.index.is_none());
    }

    #[test]
    fn growth_average_uses_shown_count() {
        let config = EngineConfig {
            top_growth: 2,
            ..EngineConfig::default()
        };
        let r = respond(Intent::HighGrowth, &dataset(), &config);
        let Response::HighGrowth(g) = r else {
            panic!("expected growth report");
        };
        assert_eq!(g.ranked.len(), 2);
        assert!((g.avg_growth.unwrap() - (67.3 + 58.9) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn risk_report_on_sample() {
        let Response::RiskAnalysis(r) = respond(Intent::RiskAnalysis, &dataset(), &EngineConfig::default())
        else {
            panic!("expected risk report");
        };
        assert_eq!(r.total, 8);
        assert!(r.unclassified.is_empty());
        assert_eq!(r.low_share_pct().map(|p| p.round()), Some(63.0));
    }

    #[test]
    fn market_report_lists_indices_and_headwinds() {
        let Response::MarketFinancial(m) =
            respond(Intent::MarketFinancial, &dataset(), &EngineConfig::default())
        else {
            panic!("expected market report");
        };
        assert_eq!(m.indices.len(), 4);
        assert_eq!(m.headwinds.len(), 2);
        assert!((m.totals.unwrap().total_revenue - 808.27).abs() < 1e-9);
    }

    #[test]
    fn comparison_ranks_technology_first() {
        let Response::SectorComparison(c) =
            respond(Intent::SectorComparison, &dataset(), &EngineConfig::default())
        else {
            panic!("expected comparison");
        };
        assert_eq!(c.sectors.len(), 5);
        assert_eq!(c.ranking[0].sector, "Technology");
        assert_eq!(c.sectors.iter().map(|s| s.count).sum::<usize>(), 8);
    }

    #[test]
    fn unmatched_query_gets_overview() {
        let a = answer(&dataset(), "  hello  ", &EngineConfig::default());
        assert_eq!(a.query, "hello");
        let Response::Overview(o) = a.response else {
            panic!("expected overview");
        };
        assert_eq!(o.stats.company_count, 8);
        assert_eq!(o.examples.len(), 3);
    }

    #[test]
    fn delay_is_applied() {
        let config = EngineConfig {
            think_delay: Duration::from_millis(20),
            ..EngineConfig::default()
        };
        let start = Instant::now();
        let a = answer_with_delay(&dataset(), "risk", &config);
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(a.intent, Intent::RiskAnalysis);
    }

    #[test]
    fn explorer_and_news_helpers() {
        let ds = dataset();
        assert_eq!(explore(&ds, &CompanyFilter::default()).len(), 8);
        assert_eq!(news_feed(&ds, "Healthcare").len(), 1);
        assert_eq!(news_feed(&ds, "").len(), 7);
    }
}
