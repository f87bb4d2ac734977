//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the query engine
//! - exported to JSON/CSV
//! - rendered by either the text reports or the TUI

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of names shown by the high-growth answer.
pub const DEFAULT_TOP_GROWTH: usize = 5;

/// Risk level that marks the low bucket (exact match).
pub const RISK_LOW: &str = "Low";
/// Risk level that marks the medium bucket (exact match).
pub const RISK_MEDIUM: &str = "Medium";
/// Marker searched for (as a substring) by the high bucket.
pub const RISK_HIGH_MARKER: &str = "High";

/// One MSME company as shipped in the embedded dataset.
///
/// Serde names follow the column names of the source dataset so CSV/JSON
/// exports line up with the original spreadsheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "Company_ID")]
    pub id: String,
    #[serde(rename = "Company_Name")]
    pub name: String,
    /// Opaque sector key; new sectors may appear in data.
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Founded_Year")]
    pub founded_year: i32,
    #[serde(rename = "Employee_Count")]
    pub employee_count: u32,
    /// Comma-separated free text; never parsed.
    #[serde(rename = "Primary_Products")]
    pub primary_products: String,
    #[serde(rename = "Credit_Rating")]
    pub credit_rating: String,
    /// Observed values: "Low", "Medium", "Medium-High".
    #[serde(rename = "Risk_Level")]
    pub risk_level: String,
    #[serde(rename = "Market_Outlook")]
    pub market_outlook: String,
    /// ₹ millions.
    #[serde(rename = "Revenue_2024")]
    pub revenue_2024: f64,
    /// ₹ millions.
    #[serde(rename = "Net_Profit_2024")]
    pub net_profit_2024: f64,
    /// Percent.
    #[serde(rename = "Profit_Margin")]
    pub profit_margin: f64,
    /// Percent, may be negative.
    #[serde(rename = "Growth_Rate")]
    pub growth_rate: f64,
}

/// Tone attached to a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// A news item. Display order is list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub summary: String,
    pub sector: String,
    pub source: String,
    pub date: NaiveDate,
    pub sentiment: Sentiment,
}

/// Direction of the last move of a market index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// A market index quote shown in the financial overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    /// Stable key, e.g. `NIFTY_MSME`.
    pub symbol: String,
    pub label: String,
    pub value: f64,
    /// Signed percent change.
    pub change_pct: f64,
    pub trend: Trend,
}

impl MarketIndex {
    /// Change formatted the way quote boards show it (`+2.34%`, `-0.87%`).
    pub fn change_display(&self) -> String {
        format!("{:+.2}%", self.change_pct)
    }
}

/// Explorer filter criteria. Empty strings mean "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFilter {
    /// Case-insensitive substring over name, location, or products.
    pub search_text: String,
    /// Exact, case-sensitive.
    pub sector: String,
    /// Exact, case-sensitive.
    pub risk_level: String,
}

impl CompanyFilter {
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.sector.is_empty() && self.risk_level.is_empty()
    }
}

/// Per-sector running totals.
///
/// A key only exists once a record contributed, so `count >= 1` and the
/// averages never divide by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAggregate {
    pub sector: String,
    pub count: usize,
    pub total_revenue: f64,
    pub total_growth: f64,
    pub total_margin: f64,
}

impl SectorAggregate {
    pub fn avg_revenue(&self) -> f64 {
        self.total_revenue / self.count as f64
    }

    pub fn avg_growth(&self) -> f64 {
        self.total_growth / self.count as f64
    }

    pub fn avg_margin(&self) -> f64 {
        self.total_margin / self.count as f64
    }
}

/// Companies split by risk level.
///
/// Not a partition: a record whose risk level is neither "Low", "Medium",
/// nor contains "High" lands in no bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskBuckets {
    pub low: Vec<CompanyRecord>,
    pub medium: Vec<CompanyRecord>,
    pub high: Vec<CompanyRecord>,
}

impl RiskBuckets {
    pub fn classified_len(&self) -> usize {
        self.low.len() + self.medium.len() + self.high.len()
    }
}

/// Sums and averages over a non-empty set of companies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_revenue: f64,
    pub avg_growth: f64,
    pub avg_margin: f64,
}

/// Headline numbers shown above every dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderStats {
    pub company_count: usize,
    pub avg_growth: f64,
    pub total_revenue: f64,
    /// `total_revenue / 1000` (₹ billions).
    pub total_revenue_billions: f64,
}

/// One row of the dashboard chart data (counts, revenue, mean growth).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSeriesPoint {
    pub sector: String,
    pub count: usize,
    pub total_revenue: f64,
    pub avg_growth: f64,
}

/// Engine knobs, derived from CLI flags and environment defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How many names the high-growth answer shows.
    pub top_growth: usize,
    /// Artificial latency before an answer is produced.
    pub think_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_growth: DEFAULT_TOP_GROWTH,
            think_delay: Duration::ZERO,
        }
    }
}
