//! Plain-text rendering of answers, the explorer grid, and the news feed.
//!
//! We keep formatting code in one place so:
//! - the query code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{CompanyRecord, HeaderStats, NewsArticle, SectorSeriesPoint};
use crate::query::QUICK_QUERIES;
use crate::report::response::{
    Answer, GrowthReport, MarketReport, Overview, Response, RiskReport, SectorComparison,
    SectorSummary,
};

/// Shown wherever a filter or report comes back empty.
pub const NO_MATCHES: &str = "No matches found.";

/// Format the header strip (company count, growth, revenue).
pub fn format_header(stats: &HeaderStats) -> String {
    format!(
        "Companies: {} | Avg growth: {:.1}% | Total revenue: ₹{:.1}B",
        stats.company_count, stats.avg_growth, stats.total_revenue_billions
    )
}

/// Format a full answer: echo of the question, then the response.
pub fn format_answer(answer: &Answer) -> String {
    let mut out = String::new();
    out.push_str(&format!("> {}\n\n", answer.query));
    out.push_str(&format_response(&answer.response));
    out
}

pub fn format_response(response: &Response) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", response.title()));
    match response {
        Response::SectorSummary(s) => push_sector_summary(&mut out, s),
        Response::RiskAnalysis(r) => push_risk(&mut out, r),
        Response::HighGrowth(g) => push_growth(&mut out, g),
        Response::MarketFinancial(m) => push_market(&mut out, m),
        Response::SectorComparison(c) => push_comparison(&mut out, c),
        Response::Overview(o) => push_overview(&mut out, o),
    }
    out
}

fn push_sector_summary(out: &mut String, s: &SectorSummary) {
    if s.companies.is_empty() {
        out.push_str(&format!("No {} companies in the dataset.\n", s.sector));
        return;
    }
    out.push_str(&format!(
        "{} {} compan{} in the dataset:\n",
        s.companies.len(),
        s.sector,
        if s.companies.len() == 1 { "y" } else { "ies" }
    ));
    for c in &s.companies {
        out.push_str(&format!(
            "- {}  revenue ₹{}M | growth {}% | margin {}%\n",
            c.name, c.revenue_2024, c.growth_rate, c.profit_margin
        ));
        out.push_str(&format!(
            "    {} | est. {} | {} staff | rating {} | risk {}\n",
            c.location, c.founded_year, c.employee_count, c.credit_rating, c.risk_level
        ));
        out.push_str(&format!("    products: {}\n", c.primary_products));
    }

    if let Some(avg) = &s.averages {
        out.push_str("\nKey figures:\n");
        out.push_str(&format!("- Average revenue: ₹{:.1}M\n", avg.revenue));
        out.push_str(&format!("- Average growth rate: {:.1}%\n", avg.growth));
        out.push_str(&format!("- Average profit margin: {:.1}%\n", avg.margin));
    }
    if let Some(idx) = &s.index {
        out.push_str(&format!(
            "- {}: {} ({})\n",
            idx.label,
            idx.value,
            idx.change_display()
        ));
    }
    if !s.headlines.is_empty() {
        out.push_str("\nRecent news:\n");
        for n in &s.headlines {
            out.push_str(&format!("- {} ({}, {})\n", n.title, n.source, n.date));
        }
    }
}

fn push_risk(out: &mut String, r: &RiskReport) {
    let groups: [(&str, &[CompanyRecord]); 3] = [
        ("Low", &r.buckets.low),
        ("Medium", &r.buckets.medium),
        ("High", &r.buckets.high),
    ];
    for (label, companies) in groups {
        out.push_str(&format!("{label} risk companies ({}):\n", companies.len()));
        for c in companies {
            out.push_str(&format!(
                "- {} ({}) rating {} | revenue ₹{}M\n",
                c.name, c.sector, c.credit_rating, c.revenue_2024
            ));
        }
    }
    if !r.unclassified.is_empty() {
        out.push_str(&format!("Unclassified risk level ({}):\n", r.unclassified.len()));
        for c in &r.unclassified {
            out.push_str(&format!("- {} ({})\n", c.name, c.risk_level));
        }
    }
    if let Some(pct) = r.low_share_pct() {
        out.push_str(&format!("\n{pct:.0}% of companies are classified as low risk.\n"));
    }
}

fn push_growth(out: &mut String, g: &GrowthReport) {
    if g.ranked.is_empty() {
        out.push_str(NO_MATCHES);
        out.push('\n');
        return;
    }
    out.push_str("Top performers by growth rate:\n");
    for (i, c) in g.ranked.iter().enumerate() {
        out.push_str(&format!(
            "#{} {}  growth {}% | {} | revenue ₹{}M | margin {}%\n",
            i + 1,
            c.name,
            c.growth_rate,
            c.sector,
            c.revenue_2024,
            c.profit_margin
        ));
        out.push_str(&format!("    {} | risk {}\n", c.location, c.risk_level));
    }
    if let Some(avg) = g.avg_growth {
        out.push_str(&format!(
            "\nAverage growth across these {}: {avg:.1}%\n",
            g.ranked.len()
        ));
    }
}

fn push_market(out: &mut String, m: &MarketReport) {
    out.push_str("Key market indices:\n");
    for idx in &m.indices {
        out.push_str(&format!(
            "- {:<22} {:>10.2} ({})\n",
            idx.label,
            idx.value,
            idx.change_display()
        ));
    }
    match &m.totals {
        Some(t) => {
            out.push_str("\nFinancial highlights:\n");
            out.push_str(&format!("- Total portfolio revenue: ₹{:.1}M\n", t.total_revenue));
            out.push_str(&format!("- Average profit margin: {:.1}%\n", t.avg_margin));
        }
        None => {
            out.push_str("\nNo companies tracked.\n");
        }
    }
    if !m.headwinds.is_empty() {
        out.push_str("\nHeadwinds:\n");
        for n in &m.headwinds {
            out.push_str(&format!("- {} ({})\n", n.title, n.source));
        }
    }
}

fn push_comparison(out: &mut String, c: &SectorComparison) {
    if c.sectors.is_empty() {
        out.push_str(NO_MATCHES);
        out.push('\n');
        return;
    }
    out.push_str(
        format!(
            "{:<18} {:>9} {:>14} {:>11} {:>11}",
            "sector", "companies", "avg revenue", "avg growth", "avg margin"
        )
        .trim_end(),
    );
    out.push('\n');
    for s in &c.sectors {
        out.push_str(&format!(
            "{:<18} {:>9} {:>13.1}M {:>10.1}% {:>10.1}%\n",
            truncate(&s.sector, 18),
            s.count,
            s.avg_revenue(),
            s.avg_growth(),
            s.avg_margin()
        ));
    }
    out.push_str("\nRanking by average growth:\n");
    for (i, r) in c.ranking.iter().enumerate() {
        out.push_str(&format!("{}. {}: {:.1}%\n", i + 1, r.sector, r.avg_growth));
    }
}

fn push_overview(out: &mut String, o: &Overview) {
    out.push_str("I can help with:\n");
    out.push_str(&format!("- Sector analysis: {}\n", o.sectors.join(", ")));
    out.push_str("- Financial performance: revenue, profit margins, growth rates\n");
    out.push_str("- Risk assessment: credit ratings, risk levels, market outlook\n");
    out.push_str("- Market data: index quotes, high-growth companies, trends\n");
    out.push_str("- News: latest industry developments\n");
    if !o.examples.is_empty() {
        out.push_str("\nTry asking:\n");
        for q in &o.examples {
            out.push_str(&format!("- \"{q}\"\n"));
        }
    }
    out.push_str(&format!("\n{}\n", format_header(&o.stats)));
}

/// Format the explorer grid.
pub fn format_company_table(rows: &[CompanyRecord]) -> String {
    if rows.is_empty() {
        return format!("{NO_MATCHES}\n");
    }
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<8} {:<28} {:<16} {:<22} {:>9} {:>7} {:>7} {:>5} {:<6} {:<11}",
            "id", "name", "sector", "location", "revenue", "growth", "margin", "staff", "rating", "risk"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<8} {:-<28} {:-<16} {:-<22} {:->9} {:->7} {:->7} {:->5} {:-<6} {:-<11}",
            "", "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for c in rows {
        out.push_str(
            format!(
                "{:<8} {:<28} {:<16} {:<22} {:>9.2} {:>6.1}% {:>6.1}% {:>5} {:<6} {:<11}",
                truncate(&c.id, 8),
                truncate(&c.name, 28),
                truncate(&c.sector, 16),
                truncate(&c.location, 22),
                c.revenue_2024,
                c.growth_rate,
                c.profit_margin,
                c.employee_count,
                truncate(&c.credit_rating, 6),
                truncate(&c.risk_level, 11),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Format the news feed.
pub fn format_news(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return format!("{NO_MATCHES}\n");
    }
    let mut out = String::new();
    for (i, n) in articles.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{}] {}  {}\n", n.sector, n.date, n.sentiment.display_name()));
        out.push_str(&format!("{}\n", n.title));
        out.push_str(&format!("  {}\n", n.summary));
        out.push_str(&format!("  via {}\n", n.source));
    }
    out
}

/// Format the dashboard series as a table.
pub fn format_sector_series(series: &[SectorSeriesPoint]) -> String {
    let mut out = String::new();
    out.push_str(
        format!("{:<18} {:>9} {:>14} {:>11}", "sector", "companies", "revenue", "avg growth").trim_end(),
    );
    out.push('\n');
    for p in series {
        out.push_str(&format!(
            "{:<18} {:>9} {:>13.1}M {:>10.1}%\n",
            truncate(&p.sector, 18),
            p.count,
            p.total_revenue,
            p.avg_growth
        ));
    }
    out
}

/// Format the preset questions, numbered from 1.
pub fn format_quick_queries() -> String {
    let mut out = String::new();
    for (i, (label, query)) in QUICK_QUERIES.iter().enumerate() {
        out.push_str(&format!("{:>2}) {:<16} {query}\n", i + 1, label));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
