//! Keyword intent router.
//!
//! A query is lower-cased and checked against [`PRIORITY`] top to bottom; the
//! first intent with a keyword contained in the query wins. Keyword sets
//! overlap ("food processing trends" also reads as a growth question), so the
//! table order decides ambiguous queries and must not be shuffled.

use serde::{Deserialize, Serialize};

/// Response categories the router can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ManufacturingSummary,
    HealthcareSummary,
    TechnologySummary,
    FoodProcessingTrends,
    RiskAnalysis,
    HighGrowth,
    MarketFinancial,
    SectorComparison,
    /// Fallback when nothing else matches.
    Default,
}

/// Routing table, highest priority first. `Default` is implicit.
const PRIORITY: &[(Intent, &[&str])] = &[
    (Intent::ManufacturingSummary, &["manufacturing"]),
    (Intent::HealthcareSummary, &["healthcare"]),
    (Intent::TechnologySummary, &["technology", "tech comparison"]),
    (Intent::FoodProcessingTrends, &["food processing", "food", "trends"]),
    (Intent::RiskAnalysis, &["risk"]),
    (Intent::HighGrowth, &["high growth", "growth"]),
    (Intent::MarketFinancial, &["stock", "market", "financial"]),
    (Intent::SectorComparison, &["sector", "compare sectors"]),
];

/// Preset questions offered as one-key shortcuts (label, query).
pub const QUICK_QUERIES: &[(&str, &str)] = &[
    ("Manufacturing", "Show me manufacturing companies"),
    ("Healthcare", "How is the healthcare sector performing?"),
    ("Tech comparison", "Technology sector comparison"),
    ("Food trends", "Tell me about food processing trends"),
    ("Risk", "Risk analysis by sector"),
    ("High growth", "Which are the high growth companies?"),
    ("Markets", "Show me the stock market overview"),
    ("Sectors", "Compare sectors"),
];

impl Intent {
    /// Every intent in routing order, `Default` last.
    pub const ALL: [Intent; 9] = [
        Intent::ManufacturingSummary,
        Intent::HealthcareSummary,
        Intent::TechnologySummary,
        Intent::FoodProcessingTrends,
        Intent::RiskAnalysis,
        Intent::HighGrowth,
        Intent::MarketFinancial,
        Intent::SectorComparison,
        Intent::Default,
    ];

    /// Route a raw query. Pure; always returns exactly one intent.
    pub fn classify(query: &str) -> Intent {
        let q = query.to_lowercase();
        PRIORITY
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| q.contains(k)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Default)
    }

    /// Trigger keywords (empty for `Default`).
    pub fn keywords(self) -> &'static [&'static str] {
        PRIORITY
            .iter()
            .find(|(intent, _)| *intent == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Intent::ManufacturingSummary => "Manufacturing Sector Analysis",
            Intent::HealthcareSummary => "Healthcare Sector Performance",
            Intent::TechnologySummary => "Technology Sector Comparison",
            Intent::FoodProcessingTrends => "Food Processing Industry Trends",
            Intent::RiskAnalysis => "Risk Analysis Across Sectors",
            Intent::HighGrowth => "High Growth Companies",
            Intent::MarketFinancial => "Stock Market & Financial Overview",
            Intent::SectorComparison => "Comprehensive Sector Comparison",
            Intent::Default => "MSME Market Intelligence Overview",
        }
    }

    /// The dataset sector a sector-summary intent is about.
    pub fn sector(self) -> Option<&'static str> {
        match self {
            Intent::ManufacturingSummary => Some("Manufacturing"),
            Intent::HealthcareSummary => Some("Healthcare"),
            Intent::TechnologySummary => Some("Technology"),
            Intent::FoodProcessingTrends => Some("Food Processing"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_examples() {
        assert_eq!(
            Intent::classify("Tell me about food processing trends"),
            Intent::FoodProcessingTrends
        );
        assert_eq!(Intent::classify("risk analysis"), Intent::RiskAnalysis);
        assert_eq!(Intent::classify("show me the stock market"), Intent::MarketFinancial);
        assert_eq!(Intent::classify("hello"), Intent::Default);
        assert_eq!(Intent::classify(""), Intent::Default);
    }

    #[test]
    fn every_keyword_routes_to_its_intent() {
        for intent in Intent::ALL {
            for keyword in intent.keywords() {
                assert_eq!(Intent::classify(keyword), intent, "keyword {keyword:?}");
            }
        }
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(Intent::classify("HEALTHCARE outlook"), Intent::HealthcareSummary);
        assert_eq!(Intent::classify("Tech Comparison please"), Intent::TechnologySummary);
    }

    #[test]
    fn priority_decides_overlaps() {
        assert_eq!(Intent::classify("manufacturing risk"), Intent::ManufacturingSummary);
        assert_eq!(Intent::classify("healthcare technology"), Intent::HealthcareSummary);
        assert_eq!(Intent::classify("food growth"), Intent::FoodProcessingTrends);
        assert_eq!(Intent::classify("market growth"), Intent::HighGrowth);
        assert_eq!(Intent::classify("sector trends"), Intent::FoodProcessingTrends);
        assert_eq!(Intent::classify("risk by sector"), Intent::RiskAnalysis);
        assert_eq!(Intent::classify("financial sector"), Intent::MarketFinancial);
    }

    #[test]
    fn substring_containment_not_words() {
        // "seafood" contains "food".
        assert_eq!(Intent::classify("seafood exporters"), Intent::FoodProcessingTrends);
    }

    #[test]
    fn quick_queries_cover_every_non_default_intent() {
        let routed: Vec<Intent> = QUICK_QUERIES.iter().map(|(_, q)| Intent::classify(q)).collect();
        for intent in Intent::ALL.iter().filter(|i| **i != Intent::Default) {
            assert!(routed.contains(intent), "{intent:?} has no quick query");
        }
    }

    #[test]
    fn default_has_no_keywords() {
        assert!(Intent::Default.keywords().is_empty());
        assert_eq!(Intent::Default.sector(), None);
    }
}
