//! Grayscale masks used as scatter post filters.

mod buffer;
mod raster;
mod shape;

pub use buffer::MaskBuffer;
pub use raster::{draw_line, draw_polygon, fill_circle, fill_rect, flood_fill};
pub use shape::{DensityCloudSettings, MaskShape};
