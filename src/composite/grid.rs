use crate::catalog::Layout;

/// Integer pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Exclusive right edge.
    pub fn right(self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y + self.height
    }
}

/// Grid cells of `layout` in row-major order.
///
/// Boundaries are floored (`floor(col * width / columns)`), so cells tile the canvas exactly even
/// when the width or height does not divide evenly.
pub fn cell_rects(layout: &Layout) -> Vec<PixelRect> {
    let cols = u64::from(layout.arrangement.columns.max(1));
    let rows = u64::from(layout.arrangement.rows.max(1));
    let w = u64::from(layout.width);
    let h = u64::from(layout.height);

    let edge = |i: u64, total: u64, n: u64| (i * total / n) as u32;

    let mut out = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        let y0 = edge(row, h, rows);
        let y1 = edge(row + 1, h, rows);
        for col in 0..cols {
            let x0 = edge(col, w, cols);
            let x1 = edge(col + 1, w, cols);
            out.push(PixelRect {
                x: x0,
                y: y0,
                width: x1 - x0,
                height: y1 - y0,
            });
        }
    }
    out
}
