use serde::{Deserialize, Serialize};

use crate::foundation::core::PixelSize;
use crate::foundation::error::{BoothError, BoothResult};

/// Largest accepted strip dimension, in pixels.
pub const MAX_STRIP_DIMENSION: u32 = 4096;

/// Grid arrangement of a strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Arrangement {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
}

impl Arrangement {
    /// Number of cells in the grid.
    pub fn capacity(self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Strip layout catalog entry: photo count, grid, and output canvas size.
///
/// `count` does not have to equal `columns * rows`; the renderer leaves surplus cells empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Layout {
    /// Stable identifier (e.g. `4-square`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short human description.
    #[serde(default)]
    pub description: String,
    /// Number of photos a capture session must produce.
    pub count: u32,
    /// Grid arrangement.
    pub arrangement: Arrangement,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl Layout {
    /// Check geometry invariants.
    pub fn validate(&self) -> BoothResult<()> {
        if self.id.trim().is_empty() {
            return Err(BoothError::validation("layout id must be non-empty"));
        }
        if self.count == 0 {
            return Err(BoothError::validation(format!(
                "layout '{}' must require at least one photo",
                self.id
            )));
        }
        if self.arrangement.columns == 0 || self.arrangement.rows == 0 {
            return Err(BoothError::validation(format!(
                "layout '{}' must have at least one column and one row",
                self.id
            )));
        }
        let dims_ok = |v: u32| (1..=MAX_STRIP_DIMENSION).contains(&v);
        if !dims_ok(self.width) || !dims_ok(self.height) {
            return Err(BoothError::validation(format!(
                "layout '{}' size {}x{} must be within 1..={MAX_STRIP_DIMENSION}",
                self.id, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Output canvas size.
    pub fn size(&self) -> PixelSize {
        PixelSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Number of grid cells (may differ from `count`).
    pub fn capacity(&self) -> usize {
        self.arrangement.capacity()
    }

    /// Number of photos required, as a length.
    pub fn required_count(&self) -> usize {
        self.count as usize
    }
}

fn builtin(
    id: &str,
    name: &str,
    description: &str,
    count: u32,
    columns: u32,
    rows: u32,
    width: u32,
    height: u32,
) -> Layout {
    Layout {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        count,
        arrangement: Arrangement { columns, rows },
        width,
        height,
    }
}

/// Layouts shipped with the crate, in display order.
pub fn builtin_layouts() -> Vec<Layout> {
    vec![
        builtin(
            "3-vertical",
            "3 Vertical Strips",
            "3 photos stacked vertically",
            3,
            1,
            3,
            400,
            500,
        ),
        builtin(
            "4-square",
            "4 Square Layout",
            "2x2 square grid",
            4,
            2,
            2,
            500,
            500,
        ),
        builtin(
            "6-half-vertical",
            "6 Half Vertical",
            "3 columns x 2 rows",
            6,
            3,
            2,
            600,
            400,
        ),
    ]
}
