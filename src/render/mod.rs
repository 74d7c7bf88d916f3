//! Rasterization of geometric primitives and the dual raster/vector canvas.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: solid and dashed non-antialiased lines
//! - **Midpoint Circle**: outlined circles for outlier markers
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod canvas;
mod primitives;

pub use canvas::Canvas;
pub use primitives::{draw_circle_outline, draw_dashed_line, draw_line, draw_rect, draw_rect_outline};
