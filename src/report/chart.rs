#![cfg(feature = "chart")]

//! PNG renderer: a 2×2 grid of salary and count bars per year, best-paid cities and vacancy
//! share per city.
//!
//! Panel geometry is computed up front ([`ChartLayout`]) so that label/series mismatches are
//! reported before anything is drawn.

use std::f64::consts::PI;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{ReportError, ReportResult};

use super::{ReportBundle, ReportRenderer};

/// One labelled series of a grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Vertical bars, one cluster per category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    /// Width of a single bar in category units.
    pub bar_width: f64,
}

impl GroupedBars {
    /// Pair `labels` with `values`; both must have the same length and every series must have
    /// one value per category.
    pub fn new(
        title: impl Into<String>,
        categories: Vec<String>,
        labels: Vec<String>,
        values: Vec<Vec<f64>>,
        bar_width: f64,
    ) -> ReportResult<Self> {
        let title = title.into();
        if labels.len() != values.len() {
            return Err(ReportError::SeriesLengthMismatch {
                chart: title,
                labels: labels.len(),
                series: values.len(),
            });
        }
        if let Some(bad) = values.iter().find(|v| v.len() != categories.len()) {
            return Err(ReportError::SeriesLengthMismatch {
                chart: title,
                labels: categories.len(),
                series: bad.len(),
            });
        }
        let series = labels
            .into_iter()
            .zip(values)
            .map(|(label, values)| BarSeries { label, values })
            .collect();
        Ok(Self {
            title,
            categories,
            series,
            bar_width,
        })
    }

    /// Horizontal extent of the bar for `series` within `category`.
    ///
    /// A cluster is centered on the category index.
    pub fn bar_span(&self, category: usize, series: usize) -> (f64, f64) {
        let cluster = self.bar_width * self.series.len() as f64;
        let start = category as f64 - cluster / 2.0 + series as f64 * self.bar_width;
        (start, start + self.bar_width)
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Horizontal bars, first label on top.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBars {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl HorizontalBars {
    /// Vertical position of the `idx`-th bar (the first bar gets the highest position).
    pub fn position(&self, idx: usize) -> f64 {
        (self.labels.len() - 1 - idx) as f64
    }
}

/// Pie slices.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlices {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl PieSlices {
    /// Start/end angle (radians, counter-clockwise from 3 o'clock) of every slice.
    ///
    /// Values are normalized by their sum, so the slices always close the circle.
    pub fn angles(&self) -> Vec<(f64, f64)> {
        let total: f64 = self.values.iter().sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut start = 0.0;
        self.values
            .iter()
            .map(|v| {
                let end = start + v / total * 2.0 * PI;
                let span = (start, end);
                start = end;
                span
            })
            .collect()
    }
}

/// All four panels of the report image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub salary: GroupedBars,
    pub counts: GroupedBars,
    pub cities: HorizontalBars,
    pub shares: PieSlices,
}

impl ChartLayout {
    /// Build the panels for `bundle`. Fails with [`ReportError::EmptyReport`] if there are no
    /// years.
    pub fn from_bundle(bundle: &ReportBundle, bar_width: f64) -> ReportResult<Self> {
        if bundle.years().is_empty() {
            return Err(ReportError::EmptyReport);
        }
        let years: Vec<String> = bundle.years().iter().map(i32::to_string).collect();
        let profession = bundle.profession().to_lowercase();

        let salary = GroupedBars::new(
            "Salary level by year",
            years.clone(),
            vec!["Average salary".to_string(), format!("Salary - {profession}")],
            vec![
                bundle.salary_by_year().values().map(|v| *v as f64).collect(),
                bundle.profession_salary_by_year().values().map(|v| *v as f64).collect(),
            ],
            bar_width,
        )?;
        let counts = GroupedBars::new(
            "Vacancy count by year",
            years,
            vec!["Vacancies".to_string(), format!("Vacancies - {profession}")],
            vec![
                bundle.count_by_year().values().map(|v| *v as f64).collect(),
                bundle.profession_count_by_year().values().map(|v| *v as f64).collect(),
            ],
            bar_width,
        )?;
        let cities = HorizontalBars {
            title: "Salary level by city".to_string(),
            labels: bundle.salary_by_city().keys().cloned().collect(),
            values: bundle.salary_by_city().values().map(|v| *v as f64).collect(),
        };
        let shares = PieSlices {
            title: "Vacancy share by city".to_string(),
            labels: bundle.share_by_city().keys().cloned().collect(),
            values: bundle.share_by_city().values().copied().collect(),
        };

        Ok(Self {
            salary,
            counts,
            cities,
            shares,
        })
    }
}

/// Renders a [`ReportBundle`] as a PNG image.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    pub width: u32,
    pub height: u32,
    pub bar_width: f64,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
            bar_width: 0.4,
        }
    }
}

impl ReportRenderer for ChartRenderer {
    fn render(&self, bundle: &ReportBundle, path: &Path) -> ReportResult<()> {
        let layout = ChartLayout::from_bundle(bundle, self.bar_width)?;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let panels = root.split_evenly((2, 2));

        draw_grouped_bars(&panels[0], &layout.salary)?;
        draw_grouped_bars(&panels[1], &layout.counts)?;
        draw_horizontal_bars(&panels[2], &layout.cities)?;
        draw_pie(&panels[3], &layout.shares)?;

        root.present().map_err(chart_err)?;
        Ok(())
    }
}

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn chart_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Chart(e.to_string())
}

/// Label for an axis position that lands on an integer index, empty otherwise.
fn index_label(labels: &[String], position: f64) -> String {
    let idx = position.round();
    if (position - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn draw_grouped_bars(area: &Panel<'_>, panel: &GroupedBars) -> ReportResult<()> {
    let n = panel.categories.len();
    let y_max = panel.max_value().max(1.0) * 1.1;
    let label_for = |x: &f64| index_label(&panel.categories, *x);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title.as_str(), ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n + 1)
        .x_label_formatter(&label_for)
        .draw()
        .map_err(chart_err)?;

    for (idx, series) in panel.series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(series.values.iter().enumerate().map(|(i, v)| {
                let (x0, x1) = panel.bar_span(i, idx);
                Rectangle::new([(x0, 0.0), (x1, *v)], color.filled())
            }))
            .map_err(chart_err)?
            .label(series.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;
    Ok(())
}

fn draw_horizontal_bars(area: &Panel<'_>, panel: &HorizontalBars) -> ReportResult<()> {
    let n = panel.labels.len();
    if n == 0 {
        area.titled(&panel.title, ("sans-serif", 22).into_font())
            .map_err(chart_err)?;
        return Ok(());
    }
    let x_max = panel.values.iter().copied().fold(0.0, f64::max).max(1.0) * 1.1;
    let label_for = |y: &f64| {
        let pos = y.round();
        if (y - pos).abs() > 1e-6 || pos < 0.0 || pos as usize >= n {
            return String::new();
        }
        panel.labels[n - 1 - pos as usize].clone()
    };

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title.as_str(), ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(160)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n + 1)
        .y_label_formatter(&label_for)
        .y_label_style(("sans-serif", 13))
        .draw()
        .map_err(chart_err)?;

    let color = Palette99::pick(0).mix(0.9);
    chart
        .draw_series(panel.values.iter().enumerate().map(|(i, v)| {
            let y = panel.position(i);
            Rectangle::new([(0.0, y - 0.4), (*v, y + 0.4)], color.filled())
        }))
        .map_err(chart_err)?;
    Ok(())
}

fn draw_pie(area: &Panel<'_>, panel: &PieSlices) -> ReportResult<()> {
    let area = area
        .titled(&panel.title, ("sans-serif", 22).into_font())
        .map_err(chart_err)?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.33;

    for (idx, (label, (start, end))) in panel.labels.iter().zip(panel.angles()).enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        area.draw(&Polygon::new(slice_points(center, radius, start, end), color.filled()))
            .map_err(chart_err)?;

        let anchor = polar(center, radius * 1.12, (start + end) / 2.0);
        area.draw(&Text::new(label.clone(), anchor, ("sans-serif", 13).into_font()))
            .map_err(chart_err)?;
    }
    Ok(())
}

/// Pixel position at `angle` on a circle (y grows downward).
fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

/// Polygon approximating a pie slice: the center followed by arc points every ~2 degrees.
fn slice_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) / (PI / 90.0)).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}
