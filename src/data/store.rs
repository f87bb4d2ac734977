//! Immutable dataset handed by reference to the query engine.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::data::sample::{sample_companies, sample_indices, sample_news};
use crate::domain::{CompanyRecord, MarketIndex, NewsArticle};
use crate::error::DatasetError;

/// Companies, news, and index quotes. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    companies: Vec<CompanyRecord>,
    news: Vec<NewsArticle>,
    indices: Vec<MarketIndex>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate company ids.
    pub fn new(
        companies: Vec<CompanyRecord>,
        news: Vec<NewsArticle>,
        indices: Vec<MarketIndex>,
    ) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(companies.len());
        for c in &companies {
            if !seen.insert(c.id.as_str()) {
                return Err(DatasetError::DuplicateId(c.id.clone()));
            }
        }

        debug!(
            companies = companies.len(),
            news = news.len(),
            indices = indices.len(),
            "dataset validated"
        );
        Ok(Self {
            companies,
            news,
            indices,
        })
    }

    /// The compiled-in MSME sample.
    pub fn embedded() -> Result<Self, DatasetError> {
        let ds = Self::new(sample_companies(), sample_news(), sample_indices())?;
        info!(companies = ds.companies.len(), "loaded embedded dataset");
        Ok(ds)
    }

    pub fn companies(&self) -> &[CompanyRecord] {
        &self.companies
    }

    pub fn news(&self) -> &[NewsArticle] {
        &self.news
    }

    pub fn indices(&self) -> &[MarketIndex] {
        &self.indices
    }

    /// Look up an index quote by symbol (e.g. `HEALTHCARE_INDEX`).
    pub fn index(&self, symbol: &str) -> Option<&MarketIndex> {
        self.indices.iter().find(|i| i.symbol == symbol)
    }

    /// Distinct company sectors in first-appearance order.
    pub fn sectors(&self) -> Vec<String> {
        distinct(self.companies.iter().map(|c| c.sector.as_str()))
    }

    /// Distinct news sectors in first-appearance order (includes "General").
    pub fn news_sectors(&self) -> Vec<String> {
        distinct(self.news.iter().map(|n| n.sector.as_str()))
    }

    /// Distinct risk levels in first-appearance order.
    pub fn risk_levels(&self) -> Vec<String> {
        distinct(self.companies.iter().map(|c| c.risk_level.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_loads() {
        let ds = Dataset::embedded().unwrap();
        assert_eq!(ds.companies().len(), 8);
        assert_eq!(ds.news().len(), 7);
        assert!(ds.index("HEALTHCARE_INDEX").is_some());
        assert!(ds.index("NOPE").is_none());
    }

    #[test]
    fn duplicate_id_is_rejected_by_name() {
        let mut companies = sample_companies();
        let mut dup = companies[0].clone();
        dup.name = "Another Oilmax".to_string();
        companies.push(dup);

        let err = Dataset::new(companies, Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, DatasetError::DuplicateId("MSME001".to_string()));
    }

    #[test]
    fn sectors_in_first_appearance_order() {
        let ds = Dataset::embedded().unwrap();
        assert_eq!(
            ds.sectors(),
            vec!["Manufacturing", "Food Processing", "Technology", "Healthcare", "Textiles"]
        );
        assert_eq!(ds.risk_levels(), vec!["Low", "Medium-High", "Medium"]);
        assert_eq!(ds.news_sectors().last().map(String::as_str), Some("General"));
    }
}
