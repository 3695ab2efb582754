//! Renderable views of how an answer was reached.
//!
//! Algorithms never build these directly; each day's solver adapts its result
//! structure into a [`Visualization`] after the answer is known.

use std::fmt;

use itertools::{Itertools, MinMaxResult};

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const MAX_SPARK_WIDTH: usize = 72;

#[derive(Debug, Clone, PartialEq)]
pub enum Visualization {
    /// A monospace picture.
    Text { title: String, body: String },
    /// A numeric series, plotted as `(x, y)` points.
    Series {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<(f64, f64)>,
    },
}

impl Visualization {
    pub fn text(title: impl Into<String>, body: impl fmt::Display) -> Self {
        Self::Text {
            title: title.into(),
            body: body.to_string(),
        }
    }

    pub fn series(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> Self {
        Self::Series {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points: points.into_iter().collect(),
        }
    }

    /// A series whose x values are the 1-based positions of `values`.
    pub fn bars<T: Into<f64>>(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| ((i + 1) as f64, v.into()));
        Self::series(title, x_label, y_label, points)
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Text { title, .. } | Self::Series { title, .. } => title,
        }
    }
}

/// Downsamples `ys` to at most `width` buckets, keeping each bucket's maximum.
fn buckets(ys: &[f64], width: usize) -> Vec<f64> {
    if ys.len() <= width {
        return ys.to_vec();
    }
    let per_bucket = (ys.len() + width - 1) / width;
    ys.chunks(per_bucket)
        .map(|chunk| chunk.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        .collect()
}

fn sparkline(ys: &[f64]) -> String {
    let (lo, hi) = match ys.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => return String::new(),
        MinMaxResult::OneElement(y) => (y, y),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    let span = hi - lo;
    ys.iter()
        .map(|&y| {
            if span == 0.0 {
                return SPARKS[SPARKS.len() / 2];
            }
            let level = ((y - lo) / span * (SPARKS.len() - 1) as f64).round() as usize;
            SPARKS[level.min(SPARKS.len() - 1)]
        })
        .collect()
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { title, body } => {
                writeln!(f, "{title}")?;
                write!(f, "{body}")
            }
            Self::Series {
                title,
                x_label,
                y_label,
                points,
            } => {
                writeln!(f, "{title}")?;
                let ys = points.iter().map(|&(_, y)| y).collect_vec();
                let (lo, hi) = ys
                    .iter()
                    .copied()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                        (lo.min(y), hi.max(y))
                    });
                if ys.is_empty() {
                    return write!(f, "(no {y_label} data)");
                }
                writeln!(f, "{}", sparkline(&buckets(&ys, MAX_SPARK_WIDTH)))?;
                write!(
                    f,
                    "{y_label}: {lo}..={hi} over {} {x_label} values",
                    points.len()
                )
            }
        }
    }
}
