//! Map-extent constants and the shared game-unit -> normalized conversion.
//!
//! Every consumer that compares or renders positions goes through
//! `game_to_normalized`, so statistics and rendering always agree on where
//! a point sits. The constants below define that contract.

/// Dota 2 playable map extent in game units.
pub const MAP_SIZE_X: f64 = 17664.0;
pub const MAP_SIZE_Y: f64 = 16643.0;

/// Game coordinates -> normalized [0,1] x [0,1], origin bottom-left.
/// Out-of-range input is clamped, never rejected.
pub fn game_to_normalized(x: f64, y: f64) -> (f64, f64) {
    let nx = (x / MAP_SIZE_X).clamp(0.0, 1.0);
    let ny = (y / MAP_SIZE_Y).clamp(0.0, 1.0);
    (nx, ny)
}

/// Minimap-cell coordinates -> game units.
///
/// OpenDota ward logs store positions as minimap grid cells offset by 64,
/// with 128 cells spanning the map. Values already in game units (anything
/// past the cell range) pass through untouched.
pub fn to_world_coords(x: f64, y: f64) -> (f64, f64) {
    if x <= 255.0 && y <= 255.0 {
        (
            ((x - 64.0) / 128.0 * MAP_SIZE_X).max(0.0),
            ((y - 64.0) / 128.0 * MAP_SIZE_Y).max(0.0),
        )
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stays_inside_unit_square() {
        for &x in &[0.0, 1.0, 4000.0, MAP_SIZE_X / 2.0, MAP_SIZE_X] {
            for &y in &[0.0, 1.0, 4000.0, MAP_SIZE_Y / 2.0, MAP_SIZE_Y] {
                let (nx, ny) = game_to_normalized(x, y);
                assert!((0.0..=1.0).contains(&nx), "nx out of range for x={x}");
                assert!((0.0..=1.0).contains(&ny), "ny out of range for y={y}");
            }
        }
    }

    #[test]
    fn monotonic_per_axis() {
        let (a, _) = game_to_normalized(1000.0, 0.0);
        let (b, _) = game_to_normalized(2000.0, 0.0);
        assert!(a < b);

        let (_, c) = game_to_normalized(0.0, 1000.0);
        let (_, d) = game_to_normalized(0.0, 2000.0);
        assert!(c < d);
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(game_to_normalized(-100.0, MAP_SIZE_Y * 2.0), (0.0, 1.0));
    }

    #[test]
    fn cell_coordinates_map_across_the_extent() {
        assert_eq!(to_world_coords(64.0, 64.0), (0.0, 0.0));
        assert_eq!(to_world_coords(192.0, 192.0), (MAP_SIZE_X, MAP_SIZE_Y));
    }

    #[test]
    fn game_units_pass_through() {
        assert_eq!(to_world_coords(1200.0, 3400.0), (1200.0, 3400.0));
    }
}
