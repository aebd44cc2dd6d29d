//! Plotting of `(time, value)` sequences.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::Result;

/// Display and export parameters of a plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Write the plot to this file instead of standard output.
    pub export_to: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            export_to: None,
            width: 72,
            height: 20,
        }
    }
}

impl PlotOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn export_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_to = Some(path.into());
        self
    }
}

/// A sink for 2-D line plots.
pub trait PlotRenderer {
    fn render(&self, points: &[(f64, f64)], options: &PlotOptions) -> Result<()>;
}

/// Renders plots as character grids.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPlot;

impl TextPlot {
    /// Draws the plot into a string.
    pub fn draw(&self, points: &[(f64, f64)], options: &PlotOptions) -> String {
        let width = options.width.max(2);
        let height = options.height.max(2);
        let mut out = String::new();
        if !options.title.is_empty() {
            out.push_str(&options.title);
            out.push('\n');
        }
        if points.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        let (x_min, x_max) = bounds(points.iter().map(|p| p.0));
        let (y_min, y_max) = bounds(points.iter().map(|p| p.1));
        let column = |x: f64| (((x - x_min) / (x_max - x_min)) * (width - 1) as f64).round() as usize;
        let row = |y: f64| (((y_max - y) / (y_max - y_min)) * (height - 1) as f64).round() as usize;

        let mut cells = vec![vec![' '; width]; height];
        if y_min < 0.0 && y_max > 0.0 {
            cells[row(0.0)].fill('-');
        }
        for &(x, y) in points {
            if x.is_finite() && y.is_finite() {
                cells[row(y)][column(x)] = '*';
            }
        }

        let margin = 10;
        if !options.y_label.is_empty() {
            out.push_str(&format!("{:>margin$}\n", options.y_label));
        }
        for (i, line) in cells.iter().enumerate() {
            let tick = match i {
                0 => format!("{y_max:>margin$.3}"),
                i if i == height - 1 => format!("{y_min:>margin$.3}"),
                _ => " ".repeat(margin),
            };
            out.push_str(&tick);
            out.push_str(" |");
            out.extend(line.iter());
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {:<half$}{:>half$}\n",
            " ".repeat(margin + 1),
            format!("{x_min:.3}"),
            format!("{x_max:.3}"),
            half = width / 2 + 1
        ));
        if !options.x_label.is_empty() {
            out.push_str(&format!("{:>w$}\n", options.x_label, w = margin + 2 + width));
        }
        out
    }
}

impl PlotRenderer for TextPlot {
    fn render(&self, points: &[(f64, f64)], options: &PlotOptions) -> Result<()> {
        let text = self.draw(points, options);
        match &options.export_to {
            Some(path) => fs::write(path, text)?,
            None => io::stdout().lock().write_all(text.as_bytes())?,
        }
        Ok(())
    }
}

/// Finite min/max, widened when degenerate.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        return (-1.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    (min, max)
}
