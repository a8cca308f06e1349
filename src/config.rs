/// Pixel geometry of the preview strip. Columns run left to right; the ramp sits
/// on top, tick marks hang below it, labels and the RF swatch below those.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub margin: f64,
    pub bar_height: u32,
    pub tick_top: u32,
    pub tick_bottom: u32,
    pub label_top: u32,
    pub swatch_size: u32,
    pub height: u32,
}

impl Default for PreviewLayout {
    fn default() -> Self {
        PreviewLayout {
            margin: 10.0,
            bar_height: 40,
            tick_top: 40,
            tick_bottom: 45,
            label_top: 55,
            swatch_size: 10,
            height: 70,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub layout: PreviewLayout,
    pub preview_width: u32,
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout: PreviewLayout::default(),
            preview_width: 600,
            extensions: vec!["txt".to_string(), "pal".to_string(), "pal3".to_string()],
        }
    }
}
