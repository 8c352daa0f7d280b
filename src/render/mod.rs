pub mod heatmap;
pub mod map_loader;
pub mod ward_map;

/// Side length of every rendered image, in pixels.
pub const MAP_IMAGE_SIZE: u32 = 1024;

const BACKGROUND: image::Rgb<u8> = image::Rgb([22, 33, 62]);

/// Minimap background, or a flat dark square when no map image is around.
pub(crate) fn base_image(size: u32) -> image::RgbImage {
    map_loader::load_map(size).unwrap_or_else(|| image::RgbImage::from_pixel(size, size, BACKGROUND))
}
