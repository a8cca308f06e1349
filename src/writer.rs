//! Canonical legacy-format output. The block grammar is never written.

use crate::models::{BandKind, ColorBand, ColorFormat, ColorTable, Rgb8};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

fn rgb_str(c: Rgb8) -> String {
    format!("{} {} {}", c.r, c.g, c.b)
}

fn rgba_str(c: Rgb8, alpha: u8) -> String {
    format!("{} {} {} {}", c.r, c.g, c.b, alpha)
}

/// One `Key: value ...` record for a band.
pub fn band_line(band: &ColorBand) -> String {
    let value = band.value();
    let start = band.start_color();
    let start_alpha = band.start_alpha();

    match (band.kind(), band.end_color(), band.format()) {
        (BandKind::Solid, _, ColorFormat::Rgba) => {
            format!("SolidColor4: {} {}", value, rgba_str(start, start_alpha))
        }
        (BandKind::Solid, _, ColorFormat::Rgb) => {
            format!("SolidColor: {} {}", value, rgb_str(start))
        }
        (BandKind::Gradient, Some(end), ColorFormat::Rgba) => format!(
            "Color4: {} {} {}",
            value,
            rgba_str(start, start_alpha),
            rgba_str(end, band.end_alpha())
        ),
        (BandKind::Gradient, Some(end), ColorFormat::Rgb) => {
            format!("Color: {} {} {}", value, rgb_str(start), rgb_str(end))
        }
        (_, _, ColorFormat::Rgba) => format!("Color4: {} {}", value, rgba_str(start, start_alpha)),
        (_, _, ColorFormat::Rgb) => format!("Color: {} {}", value, rgb_str(start)),
    }
}

/// Serialize to the legacy grammar. Bands are written from the highest
/// breakpoint down.
pub fn serialize(table: &ColorTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Product: {}", table.product);
    let _ = writeln!(out, "Units: {}", table.units);

    let optional = [
        ("Scale", &table.scale),
        ("Offset", &table.offset),
        ("Step", &table.step),
    ];
    for (key, field) in optional {
        if let Some(v) = field.as_deref().filter(|v| !v.trim().is_empty()) {
            let _ = writeln!(out, "{}: {}", key, v);
        }
    }
    out.push('\n');

    let mut bands: Vec<&ColorBand> = table.bands.iter().collect();
    bands.sort_by(|a, b| b.value().total_cmp(&a.value()));
    for band in bands {
        out.push_str(&band_line(band));
        out.push('\n');
    }

    let _ = writeln!(out, "RF: {}", rgb_str(table.rf_color));
    out
}

/// Serialize `table` and write it to `path`, replacing any existing file.
pub fn write_file<P: AsRef<Path>>(table: &ColorTable, path: P) -> io::Result<()> {
    fs::write(path, serialize(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{self, parse};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tempfile::TempDir;

    fn sample_table() -> ColorTable {
        let mut table = ColorTable::new();
        table.product = "BR".into();
        table.units = "dBZ".into();
        table.step = Some("5".into());
        table.rf_color = Rgb8::new(102, 0, 102);
        table.push_band(ColorBand::single(5.0, Rgb8::new(0, 236, 236), 255).unwrap());
        table.push_band(ColorBand::solid(20.0, Rgb8::new(1, 160, 246), 255).unwrap());
        let gradient = ColorBand::gradient(
            35.5,
            Rgb8::new(255, 0, 0),
            255,
            Rgb8::new(0, 0, 255),
            255,
        );
        table.push_band(gradient.unwrap());
        table
    }

    #[test]
    fn test_serialize_layout() {
        let text = serialize(&sample_table());
        let expected = "\
Product: BR
Units: dBZ
Step: 5

Color: 35.5 255 0 0 0 0 255
SolidColor: 20 1 160 246
Color: 5 0 236 236
RF: 102 0 102
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_band_line_variants() {
        let red = Rgb8::new(255, 0, 0);
        let blue = Rgb8::new(0, 0, 255);
        assert_eq!(
            band_line(&ColorBand::solid(1.0, red, 128).unwrap()),
            "SolidColor4: 1 255 0 0 128"
        );
        assert_eq!(
            band_line(&ColorBand::gradient(10.0, red, 128, blue, 200).unwrap()),
            "Color4: 10 255 0 0 128 0 0 255 200"
        );
        assert_eq!(
            band_line(&ColorBand::gradient(10.0, red, 255, blue, 0).unwrap()),
            "Color4: 10 255 0 0 255 0 0 255 0"
        );
        assert_eq!(
            band_line(&ColorBand::single(-2.0, red, 7).unwrap()),
            "Color4: -2 255 0 0 7"
        );
        assert_eq!(band_line(&ColorBand::single(0.25, blue, 255).unwrap()), "Color: 0.25 0 0 255");
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let mut table = ColorTable::new();
        table.scale = Some("   ".into());
        let text = serialize(&table);
        assert!(!text.contains("Scale"));
        assert!(!text.contains("Offset"));
        assert!(!text.contains("Step"));
        assert!(text.ends_with("\nRF: 255 255 255\n"));
    }

    type BandKey = (u64, BandKind, [u8; 3], u8, Option<[u8; 3]>, u8);

    fn band_keys(table: &ColorTable) -> Vec<BandKey> {
        let mut keys: Vec<BandKey> = table
            .bands
            .iter()
            .map(|b| {
                (
                    b.value().to_bits(),
                    b.kind(),
                    b.start_color().to_array(),
                    b.start_alpha(),
                    b.end_color().map(Rgb8::to_array),
                    b.end_alpha(),
                )
            })
            .collect();
        keys.sort_by(|a, b| format!("{:?}", a).cmp(&format!("{:?}", b)));
        keys
    }

    fn random_color(rng: &mut StdRng) -> Rgb8 {
        Rgb8::new(rng.random(), rng.random(), rng.random())
    }

    fn random_alpha(rng: &mut StdRng) -> u8 {
        if rng.random_bool(0.5) { 255 } else { rng.random() }
    }

    #[test]
    fn test_round_trip_random_tables() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut table = ColorTable::new();
            table.product = "Random".into();
            table.units = "m/s".into();
            table.rf_color = random_color(&mut rng);
            for _ in 0..rng.random_range(0..12) {
                let value = rng.random_range(-1000..1000) as f64 / 4.0;
                let band = match rng.random_range(0..3) {
                    0 => ColorBand::single(value, random_color(&mut rng), random_alpha(&mut rng)),
                    1 => ColorBand::solid(value, random_color(&mut rng), random_alpha(&mut rng)),
                    _ => ColorBand::gradient(
                        value,
                        random_color(&mut rng),
                        random_alpha(&mut rng),
                        random_color(&mut rng),
                        random_alpha(&mut rng),
                    ),
                };
                table.push_band(band.unwrap());
            }

            let report = reader::parse_report(&serialize(&table)).unwrap();
            assert!(report.warnings.is_empty());
            let parsed = report.table;
            assert_eq!(parsed.product, table.product);
            assert_eq!(parsed.units, table.units);
            assert_eq!(parsed.rf_color, table.rf_color);
            assert_eq!(band_keys(&parsed), band_keys(&table));
        }
    }

    #[test]
    fn test_write_file_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested.pal");
        fs::write(&path, "stale contents").unwrap();

        let table = sample_table();
        write_file(&table, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), serialize(&table));

        let report = reader::parse_file(&path).unwrap();
        assert_eq!(report.grammar, reader::Grammar::Legacy);
        assert_eq!(band_keys(&report.table), band_keys(&table));
        assert_eq!(report.table.rf_color, table.rf_color);
    }

    #[test]
    fn test_write_file_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("table.pal");
        assert!(write_file(&sample_table(), &path).is_err());
    }

    #[test]
    fn test_refused_values_keep_every_band_round_tripping() {
        let mut table = sample_table();
        assert!(!table.bands[0].set_value(f64::NAN));
        assert!(!table.bands[1].set_value(f64::INFINITY));
        assert!(ColorBand::single(f64::INFINITY, Rgb8::BLACK, 255).is_none());

        let parsed = parse(&serialize(&table)).unwrap();
        assert_eq!(parsed.bands.len(), 3);
        assert_eq!(band_keys(&parsed), band_keys(&table));
    }

    #[test]
    fn test_block_import_converts_to_legacy() {
        let block = "ColorTable {\ncategory=\"VEL\"\nunits=kts\ncolor[-10]=solid(rgb(0,0,255))\ncolor[10]=gradient(rgb(0,255,0),rgb(255,0,0))\nrf = 1 2 3\n}";
        let text = serialize(&parse(block).unwrap());
        assert_eq!(
            text,
            "Product: VEL\nUnits: kts\n\nColor: 10 0 255 0 255 0 0\nSolidColor: -10 0 0 255\nRF: 1 2 3\n"
        );
    }
}
