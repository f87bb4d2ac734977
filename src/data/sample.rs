//! Embedded MSME sample: companies, news, and index quotes.
//!
//! This is the whole dataset; there is no external load step.

use chrono::NaiveDate;

use crate::domain::{CompanyRecord, MarketIndex, NewsArticle, Sentiment, Trend};

#[allow(clippy::too_many_arguments)]
fn company(
    id: &str,
    name: &str,
    sector: &str,
    location: &str,
    founded_year: i32,
    employee_count: u32,
    primary_products: &str,
    credit_rating: &str,
    risk_level: &str,
    market_outlook: &str,
    financials: [f64; 4],
) -> CompanyRecord {
    let [revenue_2024, net_profit_2024, profit_margin, growth_rate] = financials;
    CompanyRecord {
        id: id.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        location: location.to_string(),
        founded_year,
        employee_count,
        primary_products: primary_products.to_string(),
        credit_rating: credit_rating.to_string(),
        risk_level: risk_level.to_string(),
        market_outlook: market_outlook.to_string(),
        revenue_2024,
        net_profit_2024,
        profit_margin,
        growth_rate,
    }
}

/// The eight tracked companies, in display order.
///
/// Financials are `[revenue, net profit, margin %, growth %]`.
pub fn sample_companies() -> Vec<CompanyRecord> {
    vec![
        company(
            "MSME001",
            "Oilmax Systems Pvt Ltd",
            "Manufacturing",
            "Chennai, Tamil Nadu",
            1995,
            199,
            "Metal Components, Industrial Equipment, Machinery Parts",
            "A-",
            "Low",
            "Positive",
            [122.16, 18.10, 14.82, 27.3],
        ),
        company(
            "MSME002",
            "Minimac Systems Pvt Ltd",
            "Manufacturing",
            "Coimbatore, Tamil Nadu",
            2002,
            67,
            "Industrial Equipment, Precision Parts, Machine Tools",
            "B-",
            "Medium-High",
            "Positive",
            [26.53, 3.31, 12.48, 25.3],
        ),
        company(
            "MSME003",
            "Assam Carbon Products Ltd",
            "Manufacturing",
            "Hyderabad, Telangana",
            2018,
            36,
            "Machinery Parts, Precision Parts, Tools & Dies",
            "A-",
            "Low",
            "Positive",
            [45.78, 7.89, 17.24, 35.8],
        ),
        company(
            "MSME011",
            "Suguna Foods Pvt Ltd",
            "Food Processing",
            "Coimbatore, Tamil Nadu",
            1984,
            125,
            "Poultry Products, Processed Foods, Frozen Foods",
            "A",
            "Low",
            "Very Positive",
            [189.45, 35.67, 18.83, 42.1],
        ),
        company(
            "MSME012",
            "MTR Foods Pvt Ltd",
            "Food Processing",
            "Bengaluru, Karnataka",
            1924,
            234,
            "Ready-to-Eat Foods, Spices, Traditional Foods",
            "A+",
            "Low",
            "Very Positive",
            [156.78, 28.45, 18.15, 31.2],
        ),
        company(
            "MSME021",
            "Imprezz Digital Solutions Pvt Ltd",
            "Technology",
            "Pune, Maharashtra",
            2015,
            45,
            "Web Development, Mobile Apps, Digital Marketing",
            "B+",
            "Medium",
            "Very Positive",
            [23.45, 6.78, 28.91, 67.3],
        ),
        company(
            "MSME031",
            "Core Healthcare Ltd",
            "Healthcare",
            "Mumbai, Maharashtra",
            2008,
            89,
            "Medical Devices, Diagnostic Equipment, Healthcare IT",
            "A-",
            "Low",
            "Very Positive",
            [145.67, 41.23, 28.31, 58.9],
        ),
        company(
            "MSME041",
            "Sutlej Textiles Ltd",
            "Textiles",
            "Ludhiana, Punjab",
            1986,
            156,
            "Cotton Fabrics, Denim, Technical Textiles",
            "A-",
            "Medium",
            "Positive",
            [98.45, 12.67, 12.87, 22.4],
        ),
    ]
}

fn article(
    title: &str,
    summary: &str,
    sector: &str,
    source: &str,
    (y, m, d): (i32, u32, u32),
    sentiment: Sentiment,
) -> Option<NewsArticle> {
    Some(NewsArticle {
        title: title.to_string(),
        summary: summary.to_string(),
        sector: sector.to_string(),
        source: source.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d)?,
        sentiment,
    })
}

/// The news feed, in display order.
pub fn sample_news() -> Vec<NewsArticle> {
    [
        article(
            "Indian Manufacturing PMI Hits 8-Month High in September 2025",
            "India's manufacturing sector showed strong growth with PMI reaching 56.2, driven by increased domestic and export orders.",
            "Manufacturing",
            "Economic Times",
            (2025, 10, 1),
            Sentiment::Positive,
        ),
        article(
            "Food Processing Industry Expected to Reach $535 Billion by 2025-26",
            "The food processing sector is witnessing robust growth driven by changing consumer preferences and government initiatives.",
            "Food Processing",
            "Business Standard",
            (2025, 9, 28),
            Sentiment::Positive,
        ),
        article(
            "Healthcare Technology Adoption Accelerates in Indian SMEs",
            "Small and medium healthcare enterprises are rapidly adopting digital technologies to improve patient care and operational efficiency.",
            "Healthcare",
            "LiveMint",
            (2025, 9, 30),
            Sentiment::Positive,
        ),
        article(
            "Textile Exports Face Headwinds Due to Global Economic Slowdown",
            "Indian textile exporters are experiencing challenges due to reduced global demand and supply chain disruptions.",
            "Textiles",
            "Financial Express",
            (2025, 9, 29),
            Sentiment::Negative,
        ),
        article(
            "Government Launches New Digital India Initiative for MSMEs",
            "New ₹10,000 crore digital transformation fund announced to help MSMEs adopt Industry 4.0 technologies.",
            "Technology",
            "The Hindu BusinessLine",
            (2025, 10, 2),
            Sentiment::Positive,
        ),
        article(
            "Stock Market Volatility Affects MSME Funding",
            "Recent market fluctuations have made investors cautious about funding small and medium enterprises, leading to tighter credit conditions.",
            "General",
            "Financial Times",
            (2025, 10, 3),
            Sentiment::Negative,
        ),
        article(
            "MSME Export Credit Scheme Extended for Another Year",
            "Government extends the export credit guarantee scheme helping MSMEs access international markets with better financing options.",
            "General",
            "Business Today",
            (2025, 10, 4),
            Sentiment::Positive,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn quote(symbol: &str, label: &str, value: f64, change_pct: f64) -> MarketIndex {
    MarketIndex {
        symbol: symbol.to_string(),
        label: label.to_string(),
        value,
        change_pct,
        trend: if change_pct < 0.0 { Trend::Down } else { Trend::Up },
    }
}

/// Index quotes shown in the financial overview.
pub fn sample_indices() -> Vec<MarketIndex> {
    vec![
        quote("NIFTY_MSME", "NIFTY MSME Index", 4567.89, 2.34),
        quote("BSE_SME", "BSE SME Index", 1234.56, -0.87),
        quote("MANUFACTURING_INDEX", "Manufacturing Index", 2890.45, 1.67),
        quote("HEALTHCARE_INDEX", "Healthcare Index", 3456.78, 3.21),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sizes() {
        assert_eq!(sample_companies().len(), 8);
        assert_eq!(sample_news().len(), 7);
        assert_eq!(sample_indices().len(), 4);
    }

    #[test]
    fn index_trend_follows_sign() {
        let indices = sample_indices();
        let bse = indices.iter().find(|i| i.symbol == "BSE_SME").unwrap();
        assert_eq!(bse.trend, Trend::Down);
        assert!(indices.iter().filter(|i| i.symbol != "BSE_SME").all(|i| i.trend == Trend::Up));
    }
}
