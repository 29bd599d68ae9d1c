use plotters::prelude::*;
use thiserror::Error;

use crate::domain::tier_mix::TierMixGrid;

#[derive(Error, Debug)]
pub enum HeatmapError {
    #[error("failed to render heatmap: {0}")]
    Render(String),
}

const CELL_SIZE: f64 = 0.05;

/// Render the gap-closure probability grid as a PNG heatmap.
///
/// Cells map 0 -> white and 1 -> saturated blue; invalid cells (f1 + f2 > 1)
/// are drawn in neutral gray. An empty grid renders nothing.
pub fn write_heatmap_png(output_path: &str, grid: &TierMixGrid) -> Result<(), HeatmapError> {
    if grid.cells.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(output_path, (800, 640)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HeatmapError::Render(e.to_string()))?;

    let x_max = grid.f1_values.last().copied().unwrap_or(1.0) + CELL_SIZE;
    let y_max = grid.f2_values.last().copied().unwrap_or(1.0) + CELL_SIZE;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Tier mix: gap-closure probability", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| HeatmapError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Tier 1 fraction")
        .y_desc("Tier 2 fraction")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{value:.2}"))
        .y_label_formatter(&|value| format!("{value:.2}"))
        .draw()
        .map_err(|e| HeatmapError::Render(e.to_string()))?;

    chart
        .draw_series(grid.cells.iter().enumerate().flat_map(|(j, row)| {
            let f2 = grid.f2_values[j];
            row.iter().enumerate().map(move |(i, &probability)| {
                let f1 = grid.f1_values[i];
                Rectangle::new(
                    [(f1, f2), (f1 + CELL_SIZE, f2 + CELL_SIZE)],
                    ShapeStyle::from(&cell_color(probability)).filled(),
                )
            })
        }))
        .map_err(|e| HeatmapError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HeatmapError::Render(e.to_string()))?;
    Ok(())
}

fn cell_color(probability: f64) -> RGBColor {
    if !probability.is_finite() {
        return RGBColor(229, 231, 235);
    }
    let t = probability.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    RGBColor(lerp(255, 30), lerp(255, 122), lerp(255, 204))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sample_grid() -> TierMixGrid {
        TierMixGrid {
            f1_values: vec![0.0, 0.5, 1.0],
            f2_values: vec![0.0, 0.5, 1.0],
            cells: vec![
                vec![0.0, 0.4, 1.0],
                vec![0.2, 0.8, f64::NAN],
                vec![0.9, f64::NAN, f64::NAN],
            ],
        }
    }

    #[test]
    fn cell_color_spans_white_to_blue_with_gray_for_invalid() {
        assert_eq!(cell_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(cell_color(1.0), RGBColor(30, 122, 204));
        assert_eq!(cell_color(f64::NAN), RGBColor(229, 231, 235));
    }

    #[test]
    fn write_heatmap_png_creates_the_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("tier-mix-{nanos}.png"));

        write_heatmap_png(path.to_str().unwrap(), &sample_grid()).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_grid_renders_nothing() {
        let grid = TierMixGrid {
            f1_values: vec![],
            f2_values: vec![],
            cells: vec![],
        };
        let result = write_heatmap_png("/nonexistent/dir/never-created.png", &grid);
        assert!(result.is_ok());
    }
}
