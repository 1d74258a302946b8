//! Long-form ("melted") numeric summary for grouped bar charts.
//!
//! A chart collaborator expects one value per record, grouped along the x axis by row index
//! and colored by metric name. [`chart_summary`] pivots the first numeric columns of a document
//! from wide form (one column per metric) into that long form.

use serde::Serialize;
use serde_json::json;

use crate::types::{TabularDocument, Value};

/// Maximum number of numeric columns charted.
pub const MAX_CHART_METRICS: usize = 2;

/// Chart width used by [`MeltedSeries::to_vega_lite`].
pub const CHART_WIDTH: u32 = 600;

/// One (row, metric, value) record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint<'a> {
    /// Row index in the charted document.
    #[serde(rename = "Row")]
    pub row: usize,
    /// Name of the numeric column the value comes from.
    #[serde(rename = "Metric")]
    pub metric: &'a str,
    /// The cell value; `None` for a missing cell.
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

/// Result of [`chart_summary`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSummary<'a> {
    /// At least one numeric column is available.
    Ready(MeltedSeries<'a>),
    /// The document has no numeric columns; callers warn and skip the chart.
    NoNumericData,
}

/// A lazy long-form view over up to [`MAX_CHART_METRICS`] numeric columns of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedSeries<'a> {
    document: &'a TabularDocument,
    metrics: Vec<usize>,
}

/// Select the first [`MAX_CHART_METRICS`] numeric columns of `document` for charting.
pub fn chart_summary(document: &TabularDocument) -> ChartSummary<'_> {
    let metrics: Vec<usize> = document
        .schema
        .numeric_indices()
        .take(MAX_CHART_METRICS)
        .collect();

    if metrics.is_empty() {
        tracing::debug!("no numeric columns to chart");
        ChartSummary::NoNumericData
    } else {
        ChartSummary::Ready(MeltedSeries { document, metrics })
    }
}

impl<'a> MeltedSeries<'a> {
    /// Names of the charted columns, in column order.
    pub fn metric_names(&self) -> Vec<&'a str> {
        let document = self.document;
        self.metrics
            .iter()
            .map(|&idx| document.schema.fields[idx].name.as_str())
            .collect()
    }

    /// Number of points [`Self::points`] yields: rows times charted columns.
    pub fn len(&self) -> usize {
        self.document.row_count() * self.metrics.len()
    }

    /// Whether the series has no points (the document has no rows).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate points row by row; within a row, in column order.
    pub fn points(&self) -> impl Iterator<Item = ChartPoint<'a>> + '_ {
        let document = self.document;
        document.rows.iter().enumerate().flat_map(move |(row, cells)| {
            self.metrics.iter().map(move |&idx| ChartPoint {
                row,
                metric: document.schema.fields[idx].name.as_str(),
                value: cells.get(idx).and_then(Value::as_f64),
            })
        })
    }

    /// Build a Vega-Lite grouped bar chart spec with the points inlined as data.
    pub fn to_vega_lite(&self) -> serde_json::Value {
        let values: Vec<ChartPoint<'a>> = self.points().collect();
        json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "width": CHART_WIDTH,
            "data": { "values": values },
            "mark": "bar",
            "encoding": {
                "x": { "field": "Row", "type": "ordinal", "title": "Row Index" },
                "y": { "field": "Value", "type": "quantitative" },
                "color": { "field": "Metric", "type": "nominal" }
            }
        })
    }
}
