//! Histogram binning and PNG rendering of histograms and scatter plots.
use crate::dataframe::DataFrame;
use anyhow::{anyhow, Result};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// 10cm x 10cm at 96 dpi.
pub const IMAGE_SIZE: (u32, u32) = (378, 378);

/// Bin count used when none is given.
pub const DEFAULT_BINS: usize = 20;

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Register the embedded font as `sans-serif`, once per process.
fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS).is_ok());
    if ok {
        Ok(())
    } else {
        Err(anyhow!("embedded font could not be loaded"))
    }
}

/// Equal-width bins over `[min, max]` of the input values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub width: f64,
    /// Bin heights; raw counts until [`Histogram::normalize`] rescales them.
    pub heights: Vec<f64>,
}

impl Histogram {
    /// Bin `values` into `bins` bins. `bins == 0` picks `ceil(sqrt(n))` bins.
    ///
    /// A value equal to the maximum lands in the last bin. When every value is
    /// equal there is a single bin of width 1.
    pub fn new(values: &[f64], bins: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(anyhow!("histogram of an empty column"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(anyhow!("histogram input contains non-finite values"));
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bins = if max <= min {
            1
        } else if bins == 0 {
            ((values.len() as f64).sqrt().ceil() as usize).max(1)
        } else {
            bins
        };
        let mut width = (max - min) / bins as f64;
        if width == 0.0 {
            width = 1.0;
        }
        let mut heights = vec![0.0; bins];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            heights[idx] += 1.0;
        }
        Ok(Self {
            min,
            width,
            heights,
        })
    }

    /// Rescale heights so the total area equals `sum`.
    pub fn normalize(&mut self, sum: f64) {
        let area: f64 = self.heights.iter().map(|h| h * self.width).sum();
        if area == 0.0 {
            return;
        }
        for h in &mut self.heights {
            *h *= sum / area;
        }
    }

    pub fn max(&self) -> f64 {
        self.min + self.width * self.heights.len() as f64
    }

    /// `(left, right, height)` for every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.heights.iter().enumerate().map(move |(i, &h)| {
            let left = self.min + self.width * i as f64;
            (left, left + self.width, h)
        })
    }
}

/// Render `hist` as red bars into a PNG at `path`.
pub fn save_histogram(path: impl AsRef<Path>, title: &str, hist: &Histogram) -> Result<()> {
    let path = path.as_ref();
    ensure_font()?;
    let y_max = hist.heights.iter().copied().fold(0.0, f64::max).max(1e-9);

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(hist.min..hist.max(), 0.0..(y_max * 1.05))?;

    chart.configure_mesh().disable_mesh().draw()?;
    chart.draw_series(
        hist.bars()
            .map(|(l, r, h)| Rectangle::new([(l, 0.0), (r, h)], RED.filled())),
    )?;
    chart.draw_series(
        hist.bars()
            .map(|(l, r, h)| Rectangle::new([(l, 0.0), (r, h)], BLACK.stroke_width(1))),
    )?;

    root.present()?;
    info!(path = %path.display(), "wrote histogram");
    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let lo = values.clone().fold(f64::INFINITY, f64::min);
    let hi = values.fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad, hi + pad)
}

/// Render `points` as red glyphs over a grid into a PNG at `path`.
pub fn save_scatter(
    path: impl AsRef<Path>,
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64)],
) -> Result<()> {
    let path = path.as_ref();
    ensure_font()?;
    if points.is_empty() {
        return Err(anyhow!("scatter plot without points"));
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(anyhow!("scatter input contains non-finite values"));
    }
    let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = padded_range(points.iter().map(|p| p.1));

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 2, RED.filled())),
    )?;

    root.present()?;
    info!(path = %path.display(), "wrote scatter plot");
    Ok(())
}

/// Histogram of `column` written to `<out_dir>/<column lower-cased>.png`.
pub fn column_histogram(
    df: &DataFrame,
    column: &str,
    bins: usize,
    out_dir: &Path,
) -> Result<PathBuf> {
    let hist = Histogram::new(&df.col(column)?.floats(), bins)?;
    let path = out_dir.join(format!("{}.png", column.to_lowercase()));
    save_histogram(&path, &format!("Histogram for {}", column), &hist)?;
    Ok(path)
}

/// Normalized histogram of every column except `skip`, each written to
/// `<out_dir>/<column>.png`.
pub fn histograms_for(
    df: &DataFrame,
    skip: &str,
    bins: usize,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for col in df.columns().iter().filter(|c| c.name != skip) {
        let mut hist = Histogram::new(&col.floats(), bins)?;
        hist.normalize(1.0);
        let path = out_dir.join(format!("{}.png", col.name));
        save_histogram(&path, &format!("Histogram for {}", col.name), &hist)?;
        written.push(path);
    }
    Ok(written)
}

/// Scatter plot of every column, the response included, against `response`,
/// each written to `<out_dir>/<column>_scatter.png`.
pub fn scatters_against(df: &DataFrame, response: &str, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let y_values = df.col(response)?.floats();
    let mut written = Vec::new();
    for col in df.columns() {
        let points: Vec<(f64, f64)> = col
            .floats()
            .into_iter()
            .zip(y_values.iter().copied())
            .collect();
        let path = out_dir.join(format!("{}_scatter.png", col.name));
        save_scatter(
            &path,
            &format!("Scatter plot for {}", col.name),
            &col.name,
            response,
            &points,
        )?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_min_to_max() {
        let h = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(h.min, 0.0);
        assert_eq!(h.width, 1.0);
        assert_eq!(h.heights, vec![1.0, 1.0, 1.0, 2.0]);
        assert_eq!(h.max(), 4.0);
    }

    #[test]
    fn constant_values_collapse_to_one_bin() {
        let h = Histogram::new(&[2.0, 2.0, 2.0], DEFAULT_BINS).unwrap();
        assert_eq!(h.width, 1.0);
        assert_eq!(h.heights, vec![3.0]);
        assert_eq!(h.max(), 3.0);
    }

    #[test]
    fn zero_bins_picks_ceil_sqrt_n() {
        let values: Vec<f64> = (0..16).map(f64::from).collect();
        assert_eq!(Histogram::new(&values, 0).unwrap().heights.len(), 4);
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(Histogram::new(&values, 0).unwrap().heights.len(), 4);
    }

    #[test]
    fn normalize_sets_total_area() {
        let values: Vec<f64> = (0..100).map(|i| (i % 7) as f64 * 0.5).collect();
        let mut h = Histogram::new(&values, DEFAULT_BINS).unwrap();
        h.normalize(1.0);
        let area: f64 = h.bars().map(|(l, r, height)| (r - l) * height).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Histogram::new(&[], 5).is_err());
        assert!(Histogram::new(&[1.0, f64::NAN], 5).is_err());
    }
}
