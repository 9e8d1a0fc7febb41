use std::sync::{Arc, RwLock};

use colored::Colorize;

use crate::view::{ChartBar, ChartCapability, ChartError};

/// Shared text buffer the bar chart draws into and the shell prints from.
#[derive(Debug, Clone, Default)]
pub struct ChartCanvas {
    inner: Arc<RwLock<String>>,
}

impl ChartCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> String {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, text: String) -> Result<(), ChartError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| ChartError::Render("chart canvas lock poisoned".into()))?;
        *guard = text;
        Ok(())
    }
}

/// Horizontal two-bar chart scaled to the larger of the two values.
pub struct TerminalBarChart {
    canvas: ChartCanvas,
    width: usize,
    plain: bool,
    title: String,
}

impl TerminalBarChart {
    pub fn new(
        canvas: ChartCanvas,
        width: usize,
        plain: bool,
        currency: &str,
    ) -> Result<Self, ChartError> {
        if width == 0 {
            return Err(ChartError::Unavailable("chart width is zero".into()));
        }
        let title = if currency.is_empty() {
            "Amounts".to_string()
        } else {
            format!("Amounts ({})", currency)
        };
        Ok(Self {
            canvas,
            width,
            plain,
            title,
        })
    }

    fn bar_length(&self, value: f64, max: f64) -> usize {
        if max <= 0.0 || value <= 0.0 {
            return 0;
        }
        let scaled = (value / max * self.width as f64).round() as usize;
        scaled.clamp(1, self.width)
    }

    pub fn render(&self, series: &[ChartBar; 2]) -> String {
        let max = series.iter().map(|bar| bar.value).fold(0.0_f64, f64::max);
        let label_width = series.iter().map(|bar| bar.label.len()).max().unwrap_or(0);
        let glyph = if self.plain { "#" } else { "█" };

        let mut lines = vec![self.title.clone()];
        for (idx, bar) in series.iter().enumerate() {
            let body = glyph.repeat(self.bar_length(bar.value, max));
            let body = match (self.plain, idx) {
                (true, _) => body,
                (false, 0) => body.green().to_string(),
                (false, _) => body.red().to_string(),
            };
            lines.push(format!(
                "{:<width$} |{} {:.2}",
                bar.label,
                body,
                bar.value,
                width = label_width
            ));
        }
        lines.join("\n")
    }
}

impl ChartCapability for TerminalBarChart {
    fn update_series(&mut self, series: &[ChartBar; 2]) -> Result<(), ChartError> {
        if series.iter().any(|bar| !bar.value.is_finite()) {
            return Err(ChartError::Render("series holds a non-finite value".into()));
        }
        self.canvas.replace(self.render(series))
    }
}
