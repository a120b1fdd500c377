//! Per-month bar chart frames rendered to bitmaps with plotters.

use crate::chart::axis_upper_bound;
use crate::style::parse_color;
use migboard_common::{MigboardError, MonthLabel, Result};
use migboard_config::{ChartConfig, VideoConfig};
use migboard_data::MigrationTable;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::path::Path;

/// Fallback bar color (sky blue).
const DEFAULT_BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// One bar of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBar {
    /// Business function.
    pub name: String,
    /// Workspace count.
    pub value: u32,
}

/// Everything needed to draw one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Month shown in the title.
    pub label: MonthLabel,
    /// Bars sorted ascending by value, drawn bottom to top.
    pub bars: Vec<FrameBar>,
    /// Upper bound of the value axis, shared by all frames.
    pub x_max: u32,
}

/// Plans one frame per distinct month, chronologically.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plan_frames(table: &MigrationTable, chart: &ChartConfig) -> Vec<VideoFrame> {
    let x_max = axis_upper_bound(table.max_workspace_count(), chart).ceil() as u32;

    let mut by_month: BTreeMap<MonthLabel, Vec<FrameBar>> = BTreeMap::new();
    for record in table.records() {
        by_month
            .entry(record.month_label())
            .or_default()
            .push(FrameBar {
                name: record.business_function.clone(),
                value: record.workspace_count,
            });
    }

    by_month
        .into_iter()
        .map(|(label, mut bars)| {
            bars.sort_by_key(|bar| bar.value);
            VideoFrame { label, bars, x_max }
        })
        .collect()
}

/// Trait for renderers that draw a frame to an image file.
pub trait FrameRenderer: Send + Sync {
    /// Renders `frame` to `path`.
    fn render_frame(&self, frame: &VideoFrame, path: &Path) -> Result<()>;

    /// File extension of the produced images.
    fn extension(&self) -> &'static str {
        "png"
    }
}

/// Horizontal bar chart renderer producing PNG bitmaps.
#[derive(Debug, Clone)]
pub struct BarFrameRenderer {
    width: u32,
    height: u32,
    bar_color: RGBColor,
}

impl BarFrameRenderer {
    /// Creates a renderer for `width` x `height` pixel frames.
    pub const fn new(width: u32, height: u32, bar_color: RGBColor) -> Self {
        Self {
            width,
            height,
            bar_color,
        }
    }

    /// Creates a renderer from the video configuration.
    pub fn from_config(config: &VideoConfig) -> Self {
        let bar_color = parse_color(&config.bar_color).unwrap_or_else(|| {
            tracing::warn!(color = %config.bar_color, "Invalid bar color, using default");
            DEFAULT_BAR_COLOR
        });
        Self::new(config.width, config.height, bar_color)
    }

    /// Frame size in pixels.
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for BarFrameRenderer {
    fn default() -> Self {
        Self::new(800, 500, DEFAULT_BAR_COLOR)
    }
}

impl FrameRenderer for BarFrameRenderer {
    #[allow(clippy::cast_possible_truncation)]
    fn render_frame(&self, frame: &VideoFrame, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(MigboardError::graph)?;

        let rows = frame.bars.len() as u32;
        let names: Vec<&str> = frame.bars.iter().map(|bar| bar.name.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Workspace Migration - {}", frame.label),
                FontDesc::new(FontFamily::SansSerif, 22.0, FontStyle::Normal),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(110)
            .build_cartesian_2d(0u32..frame.x_max.max(1), (0u32..rows.max(1)).into_segmented())
            .map_err(MigboardError::graph)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Workspace Count")
            .y_labels(names.len().max(1))
            .y_label_formatter(&|value: &SegmentValue<u32>| match value {
                SegmentValue::CenterOf(i) => names
                    .get(*i as usize)
                    .map_or_else(String::new, |name| (*name).to_string()),
                _ => String::new(),
            })
            .draw()
            .map_err(MigboardError::graph)?;

        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(self.bar_color.filled())
                    .margin(6)
                    .data(
                        frame
                            .bars
                            .iter()
                            .enumerate()
                            .map(|(i, bar)| (i as u32, bar.value)),
                    ),
            )
            .map_err(MigboardError::graph)?;

        let annotation = TextStyle::from(FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal))
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(frame.bars.iter().enumerate().map(|(i, bar)| {
                Text::new(
                    bar.name.clone(),
                    (bar.value.saturating_add(1), SegmentValue::CenterOf(i as u32)),
                    annotation.clone(),
                )
            }))
            .map_err(MigboardError::graph)?;

        root.present().map_err(MigboardError::graph)?;
        tracing::debug!(label = %frame.label, path = %path.display(), "Rendered frame");
        Ok(())
    }
}
