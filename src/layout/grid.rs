use crate::foundation::core::Vec2i;
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::foundation::math::floor_div;

/// Evenly spaced placement points inside a panel, inset by a margin.
///
/// A grid of `lines` cells has `lines + 1` points per axis. Point 0 sits on the margin; the
/// spacing is `floor(usable / lines)`, so the last point may fall short of the far margin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureGrid {
    lines: Vec2i,
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl FeatureGrid {
    /// Build the lattice over `area`. Fails when either line count is below 1.
    pub fn new(lines: Vec2i, area: Vec2i, margin: i32) -> TuckboxResult<Self> {
        if lines.x < 1 || lines.y < 1 {
            return Err(TuckboxError::grid(format!(
                "grid must be at least 1x1, got {}x{}",
                lines.x, lines.y
            )));
        }

        let axis = |extent: i32, n: i32| -> Vec<i32> {
            let step = floor_div(extent - 2 * margin, n);
            (0..=n).map(|i| step * i + margin).collect()
        };

        Ok(Self {
            lines,
            xs: axis(area.x, lines.x),
            ys: axis(area.y, lines.y),
        })
    }

    /// Pixel position of grid point `coord`.
    pub fn get_pos(&self, coord: Vec2i) -> TuckboxResult<Vec2i> {
        let lookup = |v: &[i32], c: i32| usize::try_from(c).ok().and_then(|i| v.get(i).copied());
        match (lookup(&self.xs, coord.x), lookup(&self.ys, coord.y)) {
            (Some(x), Some(y)) => Ok(Vec2i::new(x, y)),
            _ => Err(TuckboxError::grid(format!(
                "grid coordinate ({}, {}) is outside a {}x{} grid",
                coord.x, coord.y, self.lines.x, self.lines.y
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
