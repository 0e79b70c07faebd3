use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::error::Result;

/// A chart that can be drawn onto any plotters backend.
pub(crate) trait Figure {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Render to `path`. `.svg` files get the SVG backend, everything else the
/// bitmap backend (format taken from the extension).
pub(crate) fn save<F: Figure>(figure: &F, path: &Path, size: (u32, u32)) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    debug!("rendering {} at {}x{}", path.display(), size.0, size.1);

    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        figure.draw(&root)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        figure.draw(&root)?;
        root.present()?;
    }
    Ok(())
}

pub(crate) fn to_svg_string<F: Figure>(figure: &F, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;
        figure.draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Axis range covering `values`, padded by 5% and never empty.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> std::ops::Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if (hi - lo).abs() < 1e-9 {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// x range for `n` generation samples starting at 0.
pub(crate) fn generation_range(n: usize) -> std::ops::Range<f64> {
    0.0..(n.saturating_sub(1) as f64).max(1.0)
}
