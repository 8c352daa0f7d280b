//! Positional heatmaps: positions binned into a grid over normalized space,
//! blurred, log-scaled and colormapped over the minimap.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::coords::game_to_normalized;
use crate::error::AppError;

use super::MAP_IMAGE_SIZE;

const GRID_BINS: usize = 96;
const BLUR_PASSES: usize = 3;
const OVERLAY_ALPHA: f64 = 0.55;

/// Counting grid over normalized space. Row 0 is the bottom of the map.
#[derive(Debug, Clone)]
pub struct HeatGrid {
    bins: usize,
    cells: Vec<u32>,
}

impl HeatGrid {
    pub fn new(bins: usize) -> Self {
        HeatGrid {
            bins,
            cells: vec![0; bins * bins],
        }
    }

    pub fn increment(&mut self, nx: f64, ny: f64) {
        let x = ((nx * self.bins as f64) as usize).min(self.bins - 1);
        let y = ((ny * self.bins as f64) as usize).min(self.bins - 1);
        self.cells[y * self.bins + x] += 1;
    }

    /// Log-scaled cell intensities smoothed by repeated box blurs and
    /// normalized to [0,1].
    fn intensities(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .cells
            .iter()
            .map(|&c| (c as f64 + 1.0).log10())
            .collect();
        for _ in 0..BLUR_PASSES {
            values = box_blur(&values, self.bins);
        }
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            for v in values.iter_mut() {
                *v /= max;
            }
        }
        values
    }
}

fn box_blur(values: &[f64], bins: usize) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    for y in 0..bins {
        for x in 0..bins {
            let mut sum = 0.0;
            let mut count = 0.0;
            for dy in -1_i64..=1 {
                for dx in -1_i64..=1 {
                    let sx = x as i64 + dx;
                    let sy = y as i64 + dy;
                    if sx < 0 || sy < 0 || sx >= bins as i64 || sy >= bins as i64 {
                        continue;
                    }
                    sum += values[sy as usize * bins + sx as usize];
                    count += 1.0;
                }
            }
            out[y * bins + x] = sum / count;
        }
    }
    out
}

/// "hot" ramp: black -> red -> yellow -> white.
fn hot_color(t: f64) -> Rgb<u8> {
    let r = (t * 3.0).clamp(0.0, 1.0);
    let g = (t * 3.0 - 1.0).clamp(0.0, 1.0);
    let b = (t * 3.0 - 2.0).clamp(0.0, 1.0);
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8])
}

fn blend(base: Rgb<u8>, over: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let mix = |b: u8, o: u8| (f64::from(b) * (1.0 - alpha) + f64::from(o) * alpha) as u8;
    Rgb([
        mix(base[0], over[0]),
        mix(base[1], over[1]),
        mix(base[2], over[2]),
    ])
}

/// Render a heatmap of game-unit positions and write a PNG. An empty
/// position list still produces the bare map background.
pub fn draw_heatmap(positions: &[(f64, f64)], output: &Path) -> Result<(), AppError> {
    draw_heatmap_impl(positions, output, true)
}

/// Same as [`draw_heatmap`] for positions already in normalized space.
pub fn draw_heatmap_normalized(positions: &[(f64, f64)], output: &Path) -> Result<(), AppError> {
    draw_heatmap_impl(positions, output, false)
}

fn draw_heatmap_impl(
    positions: &[(f64, f64)],
    output: &Path,
    game_coords: bool,
) -> Result<(), AppError> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let size = MAP_IMAGE_SIZE;
    let mut img = super::base_image(size);

    if !positions.is_empty() {
        let mut grid = HeatGrid::new(GRID_BINS);
        for &(x, y) in positions {
            let (nx, ny) = if game_coords {
                game_to_normalized(x, y)
            } else {
                (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
            };
            grid.increment(nx, ny);
        }

        let intensities = grid.intensities();
        for py in 0..size {
            for px in 0..size {
                let gx = (px as usize * GRID_BINS) / size as usize;
                // grid row 0 is the bottom of the map, pixel row 0 the top
                let gy = GRID_BINS - 1 - (py as usize * GRID_BINS) / size as usize;
                let t = intensities[gy * GRID_BINS + gx];
                if t <= 0.0 {
                    continue;
                }
                let base = *img.get_pixel(px, py);
                img.put_pixel(px, py, blend(base, hot_color(t), OVERLAY_ALPHA * t));
            }
        }
    }

    img.save(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn increments_clamp_to_the_grid() {
        let mut grid = HeatGrid::new(4);
        grid.increment(0.0, 0.0);
        grid.increment(1.0, 1.0);
        grid.increment(1.0, 1.0);

        assert_eq!(grid.cells[0], 1);
        assert_eq!(grid.cells[4 * 4 - 1], 2);
    }

    #[test]
    fn empty_grid_has_no_signal() {
        let grid = HeatGrid::new(8);
        assert!(grid.intensities().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn hot_ramp_runs_black_to_white() {
        assert_eq!(hot_color(0.0), Rgb([0, 0, 0]));
        assert_eq!(hot_color(1.0), Rgb([255, 255, 255]));
        // the middle of the ramp is red-dominant
        let Rgb([r, g, b]) = hot_color(0.4);
        assert!(r > g && g >= b);
    }

    #[test]
    fn blur_conserves_a_uniform_field() {
        let values = vec![1.0; 9];
        let blurred = box_blur(&values, 3);
        assert!(blurred.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }
}
