use super::DrawOp;
use crate::config::PreviewLayout;
use crate::models::Rgb8;
use image::{ColorType, ImageEncoder, ImageResult, Rgba, RgbaImage, codecs::png::PngEncoder};
use std::io::Cursor;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TICK_COLOUR: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn rgba(c: Rgb8) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, 255])
}

/// Fill `[x0, x1) x [y0, y1)`, clipped to the image.
fn fill(img: &mut RgbaImage, x0: f64, x1: f64, y0: u32, y1: u32, px: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let x0 = x0.round().clamp(0.0, w as f64) as u32;
    let x1 = x1.round().clamp(0.0, w as f64) as u32;
    for x in x0..x1 {
        for y in y0.min(h)..y1.min(h) {
            img.put_pixel(x, y, px);
        }
    }
}

/// Paint draw ops onto a white strip. Labels are left to the caller.
pub fn rasterize(ops: &[DrawOp], width: u32, layout: &PreviewLayout) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, layout.height, BACKGROUND);

    for op in ops {
        match op {
            DrawOp::FillRect { x0, x1, color } => {
                fill(&mut img, *x0, *x1, 0, layout.bar_height, rgba(*color));
            }
            DrawOp::GradientColumn { x, color } => {
                let x = x.floor();
                fill(&mut img, x, x + 1.0, 0, layout.bar_height, rgba(*color));
            }
            DrawOp::Tick { x, .. } => {
                let x = x.round().min(width.saturating_sub(1) as f64);
                fill(
                    &mut img,
                    x,
                    x + 1.0,
                    layout.tick_top,
                    layout.tick_bottom,
                    TICK_COLOUR,
                );
            }
            DrawOp::Swatch { x0, x1, color } => {
                fill(
                    &mut img,
                    *x0,
                    *x1,
                    layout.label_top,
                    layout.label_top + layout.swatch_size,
                    rgba(*color),
                );
            }
        }
    }

    img
}

pub fn encode_png(img: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut png_data = Vec::new();
    PngEncoder::new(Cursor::new(&mut png_data)).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ColorType::Rgba8.into(),
    )?;
    Ok(png_data)
}
