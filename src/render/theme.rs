use plotters::style::RGBColor;

/// Presentation palette. Handed to the composer per call rather than set as
/// global plotting state.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bid_fill: RGBColor,
    pub bid_line: RGBColor,
    pub ask_fill: RGBColor,
    pub ask_line: RGBColor,
    pub histogram: RGBColor,
    pub p50: RGBColor,
    pub p90: RGBColor,
    pub p99: RGBColor,
    pub ma_line: RGBColor,
    pub faint_scatter: RGBColor,
    /// Ends of the quantity color ramp for raw scatter points.
    pub qty_low: RGBColor,
    pub qty_high: RGBColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bid_fill: RGBColor(0x22, 0xc5, 0x5e),
            bid_line: RGBColor(0x16, 0xa3, 0x4a),
            ask_fill: RGBColor(0xef, 0x44, 0x44),
            ask_line: RGBColor(0xdc, 0x26, 0x26),
            histogram: RGBColor(0x63, 0x66, 0xf1),
            p50: RGBColor(0xf5, 0x9e, 0x0b),
            p90: RGBColor(0xf9, 0x73, 0x16),
            p99: RGBColor(0xef, 0x44, 0x44),
            ma_line: RGBColor(0x63, 0x66, 0xf1),
            faint_scatter: RGBColor(0x94, 0xa3, 0xb8),
            qty_low: RGBColor(0xfe, 0xd9, 0x76),
            qty_high: RGBColor(0xbd, 0x00, 0x26),
        }
    }
}

impl Theme {
    /// Linear blend between the quantity ramp ends, t in [0, 1].
    pub fn qty_color(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            lerp(self.qty_low.0, self.qty_high.0),
            lerp(self.qty_low.1, self.qty_high.1),
            lerp(self.qty_low.2, self.qty_high.2),
        )
    }
}
