use super::colour::{OPAQUE, Rgb8};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Single,
    Solid,
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    Rgb,
    Rgba,
}

/// One breakpoint of the ramp. Fields are private so that the end colour only
/// exists on gradients and the format always follows the alpha bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBand {
    value: f64,
    kind: BandKind,
    start_color: Rgb8,
    start_alpha: u8,
    end_color: Option<Rgb8>,
    end_alpha: u8,
}

impl ColorBand {
    /// `None` unless `value` is finite.
    pub fn single(value: f64, color: Rgb8, alpha: u8) -> Option<Self> {
        Self::flat(value, BandKind::Single, color, alpha)
    }

    pub fn solid(value: f64, color: Rgb8, alpha: u8) -> Option<Self> {
        Self::flat(value, BandKind::Solid, color, alpha)
    }

    pub fn gradient(
        value: f64,
        start: Rgb8,
        start_alpha: u8,
        end: Rgb8,
        end_alpha: u8,
    ) -> Option<Self> {
        value.is_finite().then_some(ColorBand {
            value,
            kind: BandKind::Gradient,
            start_color: start,
            start_alpha,
            end_color: Some(end),
            end_alpha,
        })
    }

    fn flat(value: f64, kind: BandKind, color: Rgb8, alpha: u8) -> Option<Self> {
        value.is_finite().then_some(ColorBand {
            value,
            kind,
            start_color: color,
            start_alpha: alpha,
            end_color: None,
            end_alpha: OPAQUE,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn kind(&self) -> BandKind {
        self.kind
    }

    pub fn start_color(&self) -> Rgb8 {
        self.start_color
    }

    pub fn start_alpha(&self) -> u8 {
        self.start_alpha
    }

    pub fn end_color(&self) -> Option<Rgb8> {
        self.end_color
    }

    pub fn end_alpha(&self) -> u8 {
        self.end_alpha
    }

    /// RGBA as soon as any alpha byte is not fully opaque.
    pub fn format(&self) -> ColorFormat {
        let end_translucent = self.end_color.is_some() && self.end_alpha != OPAQUE;
        if self.start_alpha != OPAQUE || end_translucent {
            ColorFormat::Rgba
        } else {
            ColorFormat::Rgb
        }
    }

    /// Non-finite values are refused and leave the band unchanged.
    pub fn set_value(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.value = value;
        true
    }

    /// Switching to a gradient supplies an opaque white end colour; switching
    /// away drops the end colour.
    pub fn set_kind(&mut self, kind: BandKind) {
        self.kind = kind;
        match kind {
            BandKind::Gradient => {
                if self.end_color.is_none() {
                    self.end_color = Some(Rgb8::WHITE);
                    self.end_alpha = OPAQUE;
                }
            }
            BandKind::Single | BandKind::Solid => {
                self.end_color = None;
                self.end_alpha = OPAQUE;
            }
        }
    }

    pub fn set_start(&mut self, color: Rgb8, alpha: u8) {
        self.start_color = color;
        self.start_alpha = alpha;
    }

    /// Returns false (and changes nothing) unless the band is a gradient.
    pub fn set_end(&mut self, color: Rgb8, alpha: u8) -> bool {
        if self.kind != BandKind::Gradient {
            return false;
        }
        self.end_color = Some(color);
        self.end_alpha = alpha;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorTable {
    pub product: String,
    pub units: String,
    pub scale: Option<String>,
    pub offset: Option<String>,
    pub step: Option<String>,
    pub rf_color: Rgb8,
    pub bands: Vec<ColorBand>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_band(&mut self, band: ColorBand) {
        self.bands.push(band);
    }

    pub fn remove_band(&mut self, index: usize) -> Option<ColorBand> {
        (index < self.bands.len()).then(|| self.bands.remove(index))
    }

    /// Bands ascending by value. Equal values keep insertion order.
    pub fn sorted_bands(&self) -> Vec<&ColorBand> {
        let mut bands: Vec<&ColorBand> = self.bands.iter().collect();
        bands.sort_by(|a, b| a.value.total_cmp(&b.value));
        bands
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        let sorted = self.sorted_bands();
        Some((sorted.first()?.value, sorted.last()?.value))
    }

    /// The tick spacing hint, when it is a positive finite number.
    pub fn step_value(&self) -> Option<f64> {
        self.step
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s > 0.0)
    }
}

/// Empty and whitespace-only metadata is treated as absent.
pub fn optional_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
