use crate::models::{ColorBand, ColorTable, OPAQUE, Rgb8};
use colorgrad::{Gradient, preset};

pub const BUILTIN_PALETTES: [&str; 9] = [
    "viridis",
    "magma",
    "plasma",
    "inferno",
    "turbo",
    "cubehelix_default",
    "rainbow",
    "spectral",
    "sinebow",
];

pub fn is_builtin_palette(name: &str) -> bool {
    BUILTIN_PALETTES.contains(&name)
}

pub fn get_builtin_gradient(name: &str) -> Option<Box<dyn Gradient>> {
    Some(match name {
        "viridis" => Box::new(preset::viridis()),
        "magma" => Box::new(preset::magma()),
        "plasma" => Box::new(preset::plasma()),
        "inferno" => Box::new(preset::inferno()),
        "turbo" => Box::new(preset::turbo()),
        "cubehelix_default" => Box::new(preset::cubehelix_default()),
        "rainbow" => Box::new(preset::rainbow()),
        "spectral" => Box::new(preset::spectral()),
        "sinebow" => Box::new(preset::sinebow()),
        _ => return None,
    })
}

fn sample(grad: &dyn Gradient, t: f64) -> Rgb8 {
    let [r, g, b, _] = grad.at(t as f32).to_rgba8();
    Rgb8::new(r, g, b)
}

/// Sample a built-in palette into `bands` evenly spaced breakpoints over
/// `[min, max]`. With `gradient`, each band blends into the next sample.
/// `None` for an unknown palette or a range that yields non-finite values.
pub fn table_from_preset(
    name: &str,
    min: f64,
    max: f64,
    bands: usize,
    gradient: bool,
) -> Option<ColorTable> {
    let grad = get_builtin_gradient(name)?;
    let n = bands.max(2);
    let last = (n - 1) as f64;

    let mut table = ColorTable::new();
    table.product = name.to_string();
    for i in 0..n {
        let t = i as f64 / last;
        let value = min + (max - min) * i as f64 / last;
        let start = sample(grad.as_ref(), t);
        let band = if gradient && i + 1 < n {
            let end = sample(grad.as_ref(), (i + 1) as f64 / last);
            ColorBand::gradient(value, start, OPAQUE, end, OPAQUE)?
        } else {
            ColorBand::single(value, start, OPAQUE)?
        };
        table.push_band(band);
    }
    Some(table)
}
