use thiserror::Error;
use tracing::{debug, warn};

use crate::ledger::Money;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart unavailable: {0}")]
    Unavailable(String),
    #[error("chart update failed: {0}")]
    Render(String),
}

/// One labelled bar of the income/expense series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
}

impl ChartBar {
    pub fn income(value: Money) -> Self {
        Self {
            label: "Income",
            value: value.to_f64(),
        }
    }

    pub fn expense(value: Money) -> Self {
        Self {
            label: "Expense",
            value: value.to_f64(),
        }
    }
}

/// A rendering sink able to redraw a two-bar series in place.
pub trait ChartCapability {
    fn update_series(&mut self, series: &[ChartBar; 2]) -> Result<(), ChartError>;
}

/// Feeds the latest income/expense pair to an optional chart.
///
/// Without a chart every call still succeeds; only the latest series is kept.
#[derive(Default)]
pub struct ChartProjector {
    chart: Option<Box<dyn ChartCapability>>,
    latest: Option<[ChartBar; 2]>,
}

impl ChartProjector {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_chart(chart: impl ChartCapability + 'static) -> Self {
        Self {
            chart: Some(Box::new(chart)),
            latest: None,
        }
    }

    /// Builds the chart through `factory`; a failure leaves the projector
    /// chartless instead of propagating.
    pub fn initialize<F>(factory: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn ChartCapability>, ChartError>,
    {
        match factory() {
            Ok(chart) => Self {
                chart: Some(chart),
                latest: None,
            },
            Err(err) => {
                warn!(error = %err, "continuing without a chart");
                Self::disabled()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.chart.is_some()
    }

    pub fn update(&mut self, income: Money, expense: Money) {
        let series = [ChartBar::income(income), ChartBar::expense(expense)];
        if let Some(chart) = self.chart.as_mut() {
            match chart.update_series(&series) {
                Ok(()) => debug!(
                    income = series[0].value,
                    expense = series[1].value,
                    "chart updated"
                ),
                Err(err) => warn!(error = %err, "chart update skipped"),
            }
        }
        self.latest = Some(series);
    }

    pub fn latest(&self) -> Option<&[ChartBar; 2]> {
        self.latest.as_ref()
    }
}
