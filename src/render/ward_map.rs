//! Ward map rendering: normalized ward points scattered over the minimap.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::analysis::wards::WardBuckets;
use crate::error::AppError;

use super::MAP_IMAGE_SIZE;

const POINT_RADIUS: i64 = 6;

const OBSERVER_RADIANT: Rgb<u8> = Rgb([124, 179, 66]);
const OBSERVER_DIRE: Rgb<u8> = Rgb([229, 57, 53]);
const SENTRY_RADIANT: Rgb<u8> = Rgb([102, 187, 106]);
const SENTRY_DIRE: Rgb<u8> = Rgb([239, 83, 80]);
const EDGE: Rgb<u8> = Rgb([255, 255, 255]);

/// Normalized point -> pixel, flipping y so the game's bottom-left origin
/// lands at the bottom of the image.
fn to_pixel(nx: f64, ny: f64, size: u32) -> (i64, i64) {
    let px = (nx * (size - 1) as f64).round() as i64;
    let py = ((1.0 - ny) * (size - 1) as f64).round() as i64;
    (px, py)
}

fn draw_disc(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
                continue;
            }
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn draw_points(img: &mut RgbImage, points: &[(f64, f64)], color: Rgb<u8>) {
    let size = img.width();
    for &(nx, ny) in points {
        let (px, py) = to_pixel(nx, ny, size);
        // white rim so overlapping wards stay readable
        draw_disc(img, px, py, POINT_RADIUS + 1, EDGE);
        draw_disc(img, px, py, POINT_RADIUS, color);
    }
}

/// Render the four ward buckets onto the minimap and write a PNG.
pub fn draw_ward_map(buckets: &WardBuckets, output: &Path) -> Result<(), AppError> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut img = super::base_image(MAP_IMAGE_SIZE);
    draw_points(&mut img, &buckets.observer_radiant, OBSERVER_RADIANT);
    draw_points(&mut img, &buckets.observer_dire, OBSERVER_DIRE);
    draw_points(&mut img, &buckets.sentry_radiant, SENTRY_RADIANT);
    draw_points(&mut img, &buckets.sentry_dire, SENTRY_DIRE);
    img.save(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pixel_mapping_flips_the_y_axis() {
        // bottom-left of the map is the bottom-left of the image
        assert_eq!(to_pixel(0.0, 0.0, 100), (0, 99));
        assert_eq!(to_pixel(1.0, 1.0, 100), (99, 0));
        assert_eq!(to_pixel(0.5, 0.5, 101), (50, 50));
    }

    #[test]
    fn discs_clip_at_the_image_border() {
        let mut img = RgbImage::new(10, 10);
        draw_disc(&mut img, 0, 0, 3, Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(9, 9), Rgb([0, 0, 0]));
    }
}
