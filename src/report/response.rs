//! Structured answers handed to the presentation layer.
//!
//! Nothing in here filters or aggregates: constructors take results already
//! computed by [`crate::query`] and only shape them. Rendering to text lives
//! in [`crate::report::format`], rendering to widgets in [`crate::tui`].

use serde::{Deserialize, Serialize};

use crate::domain::{
    CompanyRecord, HeaderStats, MarketIndex, NewsArticle, RiskBuckets, SectorAggregate, Totals,
};
use crate::query::Intent;

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub query: String,
    pub intent: Intent,
    pub response: Response,
}

/// The payload for each intent family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Response {
    SectorSummary(SectorSummary),
    RiskAnalysis(RiskReport),
    HighGrowth(GrowthReport),
    MarketFinancial(MarketReport),
    SectorComparison(SectorComparison),
    Overview(Overview),
}

impl Response {
    /// Title line shared by text and TUI renderers.
    pub fn title(&self) -> &'static str {
        match self {
            Response::SectorSummary(s) => s.intent.label(),
            Response::RiskAnalysis(_) => Intent::RiskAnalysis.label(),
            Response::HighGrowth(_) => Intent::HighGrowth.label(),
            Response::MarketFinancial(_) => Intent::MarketFinancial.label(),
            Response::SectorComparison(_) => Intent::SectorComparison.label(),
            Response::Overview(_) => Intent::Default.label(),
        }
    }
}

/// Mean revenue, growth, and margin of one sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorAverages {
    pub revenue: f64,
    pub growth: f64,
    pub margin: f64,
}

impl From<&SectorAggregate> for SectorAverages {
    fn from(agg: &SectorAggregate) -> Self {
        Self {
            revenue: agg.avg_revenue(),
            growth: agg.avg_growth(),
            margin: agg.avg_margin(),
        }
    }
}

/// Companies of one sector with their averages and related context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub intent: Intent,
    pub sector: String,
    pub companies: Vec<CompanyRecord>,
    /// `None` when the sector has no companies.
    pub averages: Option<SectorAverages>,
    /// Sector news, feed order.
    pub headlines: Vec<NewsArticle>,
    pub index: Option<MarketIndex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub buckets: RiskBuckets,
    /// Companies whose risk level fits no bucket.
    pub unclassified: Vec<CompanyRecord>,
    pub total: usize,
}

impl RiskReport {
    /// Share of companies in the low bucket, in percent.
    pub fn low_share_pct(&self) -> Option<f64> {
        (self.total > 0).then(|| self.buckets.low.len() as f64 * 100.0 / self.total as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub ranked: Vec<CompanyRecord>,
    /// Mean growth over the names actually shown.
    pub avg_growth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub indices: Vec<MarketIndex>,
    pub totals: Option<Totals>,
    /// Negative-sentiment headlines (funding/market pressure).
    pub headwinds: Vec<NewsArticle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRank {
    pub sector: String,
    pub avg_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorComparison {
    /// Groups in first-appearance order.
    pub sectors: Vec<SectorAggregate>,
    /// Highest mean growth first.
    pub ranking: Vec<SectorRank>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub sectors: Vec<String>,
    pub examples: Vec<String>,
    pub stats: HeaderStats,
}

pub fn sector_summary(
    intent: Intent,
    sector: &str,
    companies: Vec<CompanyRecord>,
    aggregate: Option<&SectorAggregate>,
    headlines: Vec<NewsArticle>,
    index: Option<MarketIndex>,
) -> Response {
    Response::SectorSummary(SectorSummary {
        intent,
        sector: sector.to_string(),
        companies,
        averages: aggregate.map(SectorAverages::from),
        headlines,
        index,
    })
}

pub fn risk_report(buckets: RiskBuckets, unclassified: Vec<CompanyRecord>) -> Response {
    let total = buckets.classified_len() + unclassified.len();
    Response::RiskAnalysis(RiskReport {
        buckets,
        unclassified,
        total,
    })
}

pub fn growth_report(ranked: Vec<CompanyRecord>, avg_growth: Option<f64>) -> Response {
    Response::HighGrowth(GrowthReport { ranked, avg_growth })
}

pub fn market_report(
    indices: Vec<MarketIndex>,
    totals: Option<Totals>,
    headwinds: Vec<NewsArticle>,
) -> Response {
    Response::MarketFinancial(MarketReport {
        indices,
        totals,
        headwinds,
    })
}

pub fn sector_comparison(sectors: Vec<SectorAggregate>, ranking: Vec<(String, f64)>) -> Response {
    Response::SectorComparison(SectorComparison {
        sectors,
        ranking: ranking
            .into_iter()
            .map(|(sector, avg_growth)| SectorRank { sector, avg_growth })
            .collect(),
    })
}

pub fn overview(sectors: Vec<String>, examples: Vec<String>, stats: HeaderStats) -> Response {
    Response::Overview(Overview {
        sectors,
        examples,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_in_json() {
        let response = growth_report(Vec::new(), None);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "HighGrowth");
        assert!(json["avg_growth"].is_null());
    }

    #[test]
    fn risk_report_counts_unclassified() {
        let report = match risk_report(RiskBuckets::default(), Vec::new()) {
            Response::RiskAnalysis(r) => r,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(report.total, 0);
        assert_eq!(report.low_share_pct(), None);
    }

    #[test]
    fn titles_follow_intent_labels() {
        let r = sector_summary(Intent::HealthcareSummary, "Healthcare", Vec::new(), None, Vec::new(), None);
        assert_eq!(r.title(), "Healthcare Sector Performance");
        assert_eq!(overview(Vec::new(), Vec::new(), HeaderStats {
            company_count: 0,
            avg_growth: 0.0,
            total_revenue: 0.0,
            total_revenue_billions: 0.0,
        })
        .title(), Intent::Default.label());
    }
}
