//! Animated horizontal bar chart as a Plotly-compatible figure description.
//!
//! The figure is plain data: it is built by a pure function from filtered
//! rows and serialized to JSON for client-side rendering.

use crate::style::{category_color, to_hex};
use migboard_common::MonthLabel;
use migboard_config::ChartConfig;
use migboard_data::LabeledRow;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Milliseconds each frame stays on screen when playing.
const FRAME_DURATION_MS: u32 = 500;

/// A complete figure: initial traces, layout and animation frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFigure {
    /// Traces shown before the animation starts (the first frame's traces).
    pub data: Vec<BarTrace>,
    /// Figure layout.
    pub layout: Layout,
    /// One frame per month, chronological.
    pub frames: Vec<AnimationFrame>,
}

/// One horizontal bar for one business function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    /// Always `"bar"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Always `"h"`.
    pub orientation: &'static str,
    /// Business function.
    pub name: String,
    /// Groups the same function across frames.
    pub legendgroup: String,
    /// Workspace counts.
    pub x: Vec<u32>,
    /// Business function labels.
    pub y: Vec<String>,
    /// Bar fill.
    pub marker: Marker,
    /// Hover text template.
    pub hovertemplate: String,
    /// Legend visibility.
    pub showlegend: bool,
}

/// Bar fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    /// `#rrggbb` color.
    pub color: String,
}

/// Traces for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationFrame {
    /// `YYYY-MM` label; also the slider step label.
    pub name: String,
    /// Traces of this month.
    pub data: Vec<BarTrace>,
}

/// Text holder used for titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// Title text.
    pub text: String,
}

/// Axis settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: Title,
    /// Fixed range; autoscaled when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Disables autoscaling when a range is fixed.
    pub autorange: bool,
}

/// Figure layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Figure title.
    pub title: Title,
    /// Height in pixels.
    pub height: u32,
    /// Legend visibility.
    pub showlegend: bool,
    /// How bars of different traces share a category.
    pub barmode: &'static str,
    /// Horizontal axis (workspace count).
    pub xaxis: Axis,
    /// Vertical axis (business function).
    pub yaxis: Axis,
    /// Play / pause controls.
    pub updatemenus: Vec<UpdateMenu>,
    /// Month slider.
    pub sliders: Vec<Slider>,
}

/// A button group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMenu {
    /// Always `"buttons"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Direction the buttons are laid out in.
    pub direction: &'static str,
    /// Whether the active button is highlighted.
    pub showactive: bool,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Horizontal anchor.
    pub xanchor: &'static str,
    /// Vertical anchor.
    pub yanchor: &'static str,
    /// Buttons.
    pub buttons: Vec<Button>,
}

/// A single animation button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    /// Button caption.
    pub label: String,
    /// Always `"animate"`.
    pub method: &'static str,
    /// Arguments to `Plotly.animate`.
    pub args: Vec<Value>,
}

/// The frame slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    /// Index of the selected step.
    pub active: usize,
    /// Prefix of the current value readout.
    pub currentvalue: Value,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Relative length.
    pub len: f64,
    /// Steps, one per frame.
    pub steps: Vec<SliderStep>,
}

/// One slider stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderStep {
    /// Month label.
    pub label: String,
    /// Always `"animate"`.
    pub method: &'static str,
    /// Arguments to `Plotly.animate`.
    pub args: Vec<Value>,
}

/// Upper bound of the workspace axis.
///
/// The bound is derived from the largest count over every frame so the scale
/// stays put while the animation plays.
pub fn axis_upper_bound(max_workspace_count: Option<u32>, config: &ChartConfig) -> f64 {
    max_workspace_count
        .map_or(config.min_range, |max| {
            (f64::from(max) * config.range_headroom).max(config.min_range)
        })
}

/// Builds the animated figure for `rows`.
pub fn build_chart(rows: &[LabeledRow], config: &ChartConfig) -> ChartFigure {
    let categories: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.row.record.business_function.as_str())
        .collect();
    let color_of = |name: &str| {
        let index = categories.iter().position(|c| *c == name).unwrap_or(0);
        to_hex(category_color(index))
    };

    let mut by_month: BTreeMap<&MonthLabel, Vec<&LabeledRow>> = BTreeMap::new();
    for row in rows {
        by_month.entry(&row.month_label).or_default().push(row);
    }

    let frames: Vec<AnimationFrame> = by_month
        .into_iter()
        .map(|(label, month_rows)| AnimationFrame {
            name: label.to_string(),
            data: month_rows
                .into_iter()
                .map(|r| bar_trace(r, &color_of(&r.row.record.business_function), config))
                .collect(),
        })
        .collect();

    let max = rows.iter().map(|r| r.row.record.workspace_count).max();
    let upper = axis_upper_bound(max, config);

    ChartFigure {
        data: frames.first().map(|f| f.data.clone()).unwrap_or_default(),
        layout: layout(config, upper, &frames),
        frames,
    }
}

fn bar_trace(row: &LabeledRow, color: &str, config: &ChartConfig) -> BarTrace {
    let name = row.row.record.business_function.clone();
    BarTrace {
        kind: "bar",
        orientation: "h",
        legendgroup: name.clone(),
        x: vec![row.row.record.workspace_count],
        y: vec![name.clone()],
        marker: Marker {
            color: color.to_string(),
        },
        hovertemplate: format!(
            "{}=%{{y}}<br>{}=%{{x}}<extra></extra>",
            config.y_axis_title, config.x_axis_title
        ),
        showlegend: false,
        name,
    }
}

fn animate_options(frame_ms: u32) -> Value {
    json!({
        "frame": { "duration": frame_ms, "redraw": true },
        "mode": "immediate",
        "fromcurrent": true,
        "transition": { "duration": frame_ms, "easing": "linear" }
    })
}

fn layout(config: &ChartConfig, upper: f64, frames: &[AnimationFrame]) -> Layout {
    let play = Button {
        label: "\u{25B6}".to_string(),
        method: "animate",
        args: vec![Value::Null, animate_options(FRAME_DURATION_MS)],
    };
    let pause = Button {
        label: "\u{25FC}".to_string(),
        method: "animate",
        args: vec![json!([null]), animate_options(0)],
    };

    let steps = frames
        .iter()
        .map(|f| SliderStep {
            label: f.name.clone(),
            method: "animate",
            args: vec![json!([f.name]), animate_options(0)],
        })
        .collect();

    Layout {
        title: Title {
            text: config.title.clone(),
        },
        height: config.height,
        showlegend: false,
        barmode: "relative",
        xaxis: Axis {
            title: Title {
                text: config.x_axis_title.clone(),
            },
            range: Some([0.0, upper]),
            autorange: false,
        },
        yaxis: Axis {
            title: Title {
                text: config.y_axis_title.clone(),
            },
            range: None,
            autorange: true,
        },
        updatemenus: vec![UpdateMenu {
            kind: "buttons",
            direction: "left",
            showactive: false,
            x: 0.1,
            y: 0.0,
            xanchor: "right",
            yanchor: "top",
            buttons: vec![play, pause],
        }],
        sliders: vec![Slider {
            active: 0,
            currentvalue: json!({ "prefix": "month=" }),
            x: 0.1,
            y: 0.0,
            len: 0.9,
            steps,
        }],
    }
}
