//! Yearly projection summary

use serde::{Deserialize, Serialize};

use super::entries::YearProjection;
use super::record::{FormRecord, MAX_DURATION_YEARS, MIN_DURATION_YEARS};

/// Warning attached to a year with a complete estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionSignal {
    /// Costs exceed revenue
    Loss,
    BreakEven,
}

impl ProjectionSignal {
    fn for_profit(profit: f64) -> Option<Self> {
        if profit < 0.0 {
            Some(Self::Loss)
        } else if profit == 0.0 {
            Some(Self::BreakEven)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearOutcome {
    pub year: u32,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    /// Revenue and cost were both non-zero, so the year feeds the totals
    pub counted: bool,
    pub signal: Option<ProjectionSignal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub years: Vec<YearOutcome>,
    pub totals: Totals,
}

impl FinancialSummary {
    pub fn signals(&self) -> impl Iterator<Item = (u32, ProjectionSignal)> + '_ {
        self.years
            .iter()
            .filter_map(|y| y.signal.map(|signal| (y.year, signal)))
    }
}

fn outcome(year: u32, projection: &YearProjection) -> YearOutcome {
    let profit = projection.profit();
    // A zero revenue or cost reads as "not entered yet"
    let counted = projection.revenue != 0.0 && projection.cost != 0.0;
    YearOutcome {
        year,
        revenue: projection.revenue,
        cost: projection.cost,
        profit,
        counted,
        signal: if counted {
            ProjectionSignal::for_profit(profit)
        } else {
            None
        },
    }
}

impl FormRecord {
    /// Summarize the first `duration` plan years (clamped to 1..=5)
    pub fn compute_financials(&self, duration: u8) -> FinancialSummary {
        let duration = duration.clamp(MIN_DURATION_YEARS, MAX_DURATION_YEARS);
        let empty = YearProjection::default();

        let years: Vec<YearOutcome> = (1..=u32::from(duration))
            .map(|year| {
                let projection = self
                    .financials
                    .projections
                    .get(year as usize - 1)
                    .unwrap_or(&empty);
                outcome(year, projection)
            })
            .collect();

        let totals = years
            .iter()
            .filter(|y| y.counted)
            .fold(Totals::default(), |acc, y| Totals {
                revenue: acc.revenue + y.revenue,
                cost: acc.cost + y.cost,
                profit: acc.profit + y.profit,
            });

        let summary = FinancialSummary { years, totals };
        for (year, signal) in summary.signals() {
            tracing::debug!(year, ?signal, "projection warning");
        }
        summary
    }

    /// Summary over the record's own plan duration
    pub fn financial_summary(&self) -> FinancialSummary {
        self.compute_financials(self.financials.duration_years)
    }
}
