pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reader;
pub mod render;
pub mod utils;
pub mod writer;

pub use config::{Config, PreviewLayout};
pub use error::{ErrorKind, ParseError};
pub use models::{BandKind, ColorBand, ColorFormat, ColorTable, Rgb8};
pub use reader::{Grammar, ParseReport, parse, parse_file, parse_report};
pub use render::{DrawOp, render, render_with};
pub use writer::serialize;
