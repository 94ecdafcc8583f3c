//! Plain-text presentation of the ground grid.

use groundwork_core::GroundType;
use groundwork_world::GroundGrid;

/// Character used to draw a cell holding `ground`.
pub(crate) const fn glyph(ground: GroundType) -> char {
    match ground {
        GroundType::None => '.',
        GroundType::Rock => '#',
        GroundType::Sand => ':',
        GroundType::Grass => '"',
        GroundType::Lake => '~',
        GroundType::Mountain => '^',
    }
}

/// Draws the bounding box of the occupied cells, one grid row per line.
///
/// Returns an empty string when no cell holds ground.
pub(crate) fn render_map(grid: &GroundGrid) -> String {
    let bounds = grid.occupied().fold(None::<(i32, i32, i32, i32)>, |bounds, (cell, _)| {
        let (x, y) = (cell.x(), cell.y());
        Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        })
    });
    let Some((min_x, min_y, max_x, max_y)) = bounds else {
        return String::new();
    };

    let mut map = String::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            map.push(glyph(grid.tile_type(x, y)));
        }
        map.push('\n');
    }
    map
}

/// One line per ground type with its number of instances, skipping types
/// with none.
pub(crate) fn ground_tally(counts: impl IntoIterator<Item = (GroundType, usize)>) -> String {
    counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(ground, count)| format!("{ground:>8} {glyph} x{count}\n", glyph = glyph(ground)))
        .collect()
}
