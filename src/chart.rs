use log::debug;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tempfile::Builder;

use crate::{min_and_max, Config, Dataset, Error, Field, Result, Trial};

const TITLE_HEIGHT: i32 = 80;
const TITLE_FONT: (&str, u32) = ("sans-serif", 26);
const LABEL_FONT: (&str, u32) = ("sans-serif", 20);

/// Two lines: the compared fields with the annotation,
/// then the starting values taken from `first`.
pub fn title(x: Field, y: Field, annotation: &str, first: &Trial) -> String {
    format!(
        "{} vs {} ({})\n(Starting at iters={} key_max={} threads={})",
        x, y, annotation, first.iters, first.key_max, first.threads
    )
}

/// Plot range covering `values` with a 5% margin on each side,
/// one unit when all values are equal.
pub fn axis_range(values: &[f64]) -> Option<Range<f64>> {
    let (min, max) = min_and_max(values)?;
    let span = max - min;
    let margin = if span > 0. { span / 20. } else { 1. };
    Some(min - margin..max + margin)
}

/// Every series as (label, points), points in file order.
pub fn lines(dataset: &Dataset, x: Field, y: Field) -> Vec<(&str, Vec<(f64, f64)>)> {
    dataset
        .series()
        .iter()
        .map(|s| {
            let (xs, ys) = s.extract(x, y);
            let points = xs
                .into_iter()
                .zip(ys)
                .map(|(x, y)| (x as f64, y as f64))
                .collect();
            (s.label.as_str(), points)
        })
        .collect()
}

fn plot_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

/// Draws one line per series and writes a png to `config.output`,
/// replacing any file already there. The image is drawn to a scratch
/// `.png` in the same directory and renamed into place once complete,
/// so a failed render leaves `config.output` untouched and the format
/// does not depend on the output extension.
pub fn render(dataset: &Dataset, config: &Config) -> Result<()> {
    let dir = match config.output.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let scratch = Builder::new()
        .prefix(".trial_plot")
        .suffix(".png")
        .tempfile_in(dir)
        .map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    draw(dataset, config, scratch.path())?;
    scratch
        .persist(&config.output)
        .map_err(|e| Error::Io {
            path: config.output.clone(),
            source: e.error,
        })?;
    Ok(())
}

/// The bitmap backend flushes to `path` when dropped, finished or not.
fn draw(dataset: &Dataset, config: &Config, path: &Path) -> Result<()> {
    let first = dataset.first_trial()?;
    let title = title(config.x_axis, config.y_axis, &config.annotation, first);
    let lines = lines(dataset, config.x_axis, config.y_axis);

    let xs: Vec<f64> = lines.iter().flat_map(|(_, p)| p.iter().map(|q| q.0)).collect();
    let ys: Vec<f64> = lines.iter().flat_map(|(_, p)| p.iter().map(|q| q.1)).collect();
    let no_trials = || Error::NoTrials {
        label: String::new(),
    };
    let xrange = axis_range(&xs).ok_or_else(no_trials)?;
    let yrange = axis_range(&ys).ok_or_else(no_trials)?;

    let root = BitMapBackend::new(path, config.size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let (header, body) = root.split_vertically(TITLE_HEIGHT);

    let (width, _) = header.dim_in_pixel();
    let title_style = TextStyle::from(TITLE_FONT.into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in title.lines().enumerate() {
        let y = 10 + i as i32 * (TITLE_FONT.1 as i32 + 6);
        header
            .draw_text(line, &title_style, (width as i32 / 2, y))
            .map_err(plot_err)?;
    }

    let mut chart = ChartBuilder::on(&body)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(xrange, yrange)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
        .label_style(LABEL_FONT)
        .x_desc(config.x_axis.name())
        .y_desc(config.y_axis.name())
        .draw()
        .map_err(plot_err)?;

    for (i, (label, points)) in lines.into_iter().enumerate() {
        debug!("drawing {} points for '{}'", points.len(), label);
        let style = Palette99::pick(i).stroke_width(3);
        chart
            .draw_series(LineSeries::new(points, style))
            .map_err(plot_err)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .label_font(LABEL_FONT)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    Ok(())
}
