pub mod colour;
pub mod table;

pub use colour::{OPAQUE, Rgb8, hex_to_rgb, rgb_to_hex};
pub use table::{BandKind, ColorBand, ColorFormat, ColorTable};
