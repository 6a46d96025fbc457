//! Text bar chart of category totals

use std::collections::BTreeMap;

use super::{EmptyReport, ReportResult, TextReport};
use crate::models::Money;

/// Bar width given to the largest category
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// One bar of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub amount: Money,
    /// Number of bar characters
    pub length: usize,
}

/// Proportional bars, one per category, in category-name order
#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub bars: Vec<Bar>,
}

impl Visualization {
    /// Scale every total against the largest one
    ///
    /// The largest total gets `width` characters and the others are truncated
    /// proportionally. When the largest total is zero every bar is empty.
    pub fn generate(totals: &BTreeMap<String, Money>, width: usize) -> ReportResult<Self> {
        let Some(max) = totals.values().max().copied() else {
            return ReportResult::Empty(EmptyReport::NoData);
        };

        let bars = totals
            .iter()
            .map(|(category, &amount)| Bar {
                category: category.clone(),
                amount,
                length: bar_length(amount, max, width),
            })
            .collect();

        ReportResult::Ready(Self { bars })
    }
}

fn bar_length(amount: Money, max: Money, width: usize) -> usize {
    if !max.is_positive() || !amount.is_positive() {
        return 0;
    }
    let scaled = i128::from(amount.cents()) * width as i128 / i128::from(max.cents());
    usize::try_from(scaled).unwrap_or(0).min(width)
}

impl TextReport for Visualization {
    fn format_terminal_with(&self, symbol: &str) -> String {
        let mut output = String::from("Category Visualization:\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for bar in &self.bars {
            output.push_str(&format!(
                "{:<20} {} {}{:>8}\n",
                bar.category,
                "█".repeat(bar.length),
                symbol,
                bar.amount.format_plain()
            ));
        }

        output
    }
}
