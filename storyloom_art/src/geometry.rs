// Canvas coordinate spaces and number formatting.
//
// Both illustrations address their canvas in percentages of the fixed
// viewBox (scene 800x500, portrait 300x300), which is how the attributes
// are written (`cx="42.5%"`). SVG path data and polygon point lists do not
// accept percentages, so `Canvas` converts percentage pairs into user units
// for those two cases.
//
// See also: `svg.rs` for the element tree these values are written into.

use std::fmt;
use std::fmt::Write;

/// A fixed logical drawing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    /// The full-story scene canvas.
    pub const SCENE: Canvas = Canvas {
        width: 800.0,
        height: 500.0,
    };

    /// The character portrait canvas.
    pub const PORTRAIT: Canvas = Canvas {
        width: 300.0,
        height: 300.0,
    };

    /// Value for the root `viewBox` attribute.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", Num(self.width), Num(self.height))
    }

    /// Convert a percentage position into user units.
    pub fn to_user(self, x_pct: f64, y_pct: f64) -> (f64, f64) {
        (self.width * x_pct / 100.0, self.height * y_pct / 100.0)
    }

    /// Polygon `points` attribute from percentage positions.
    pub fn points(&self, pts: &[(f64, f64)]) -> String {
        let mut out = String::new();
        for (i, &(x, y)) in pts.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let (ux, uy) = self.to_user(x, y);
            let _ = write!(out, "{},{}", Num(ux), Num(uy));
        }
        out
    }

    /// Start a path whose coordinates are given in percentages.
    pub fn path(&self) -> PathData {
        PathData {
            canvas: *self,
            d: String::new(),
        }
    }
}

/// Builder for SVG path data with percentage inputs.
#[derive(Clone, Debug)]
pub struct PathData {
    canvas: Canvas,
    d: String,
}

impl PathData {
    pub fn move_to(mut self, x_pct: f64, y_pct: f64) -> Self {
        let (x, y) = self.canvas.to_user(x_pct, y_pct);
        self.sep();
        let _ = write!(self.d, "M{},{}", Num(x), Num(y));
        self
    }

    /// Quadratic Bezier through control point `(cx, cy)` to `(x, y)`.
    pub fn quad_to(mut self, cx_pct: f64, cy_pct: f64, x_pct: f64, y_pct: f64) -> Self {
        let (cx, cy) = self.canvas.to_user(cx_pct, cy_pct);
        let (x, y) = self.canvas.to_user(x_pct, y_pct);
        self.sep();
        let _ = write!(self.d, "Q{},{} {},{}", Num(cx), Num(cy), Num(x), Num(y));
        self
    }

    fn sep(&mut self) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
    }

    pub fn finish(self) -> String {
        self.d
    }
}

/// A number printed with at most two decimals and no trailing zeros.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        if rounded == 0.0 || !rounded.is_finite() {
            return f.write_str("0");
        }
        let s = format!("{rounded:.2}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        f.write_str(s)
    }
}

/// A percentage length, e.g. `42.5%`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pct(pub f64);

impl fmt::Display for Pct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", Num(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(Num(10.0).to_string(), "10");
        assert_eq!(Num(12.5).to_string(), "12.5");
        assert_eq!(Num(0.333333).to_string(), "0.33");
        assert_eq!(Num(-0.001).to_string(), "0");
        assert_eq!(Num(f64::NAN).to_string(), "0");
    }

    #[test]
    fn pct_appends_percent_sign() {
        assert_eq!(Pct(75.0).to_string(), "75%");
        assert_eq!(Pct(33.3333).to_string(), "33.33%");
    }

    #[test]
    fn scene_conversion_uses_canvas_size() {
        assert_eq!(Canvas::SCENE.to_user(50.0, 50.0), (400.0, 250.0));
        assert_eq!(Canvas::SCENE.view_box(), "0 0 800 500");
        assert_eq!(Canvas::PORTRAIT.view_box(), "0 0 300 300");
    }

    #[test]
    fn polygon_points_in_user_units() {
        let pts = Canvas::SCENE.points(&[(0.0, 75.0), (15.0, 40.0)]);
        assert_eq!(pts, "0,375 120,200");
    }

    #[test]
    fn path_builder_converts_percentages() {
        let d = Canvas::PORTRAIT
            .path()
            .move_to(40.0, 50.0)
            .quad_to(50.0, 60.0, 60.0, 50.0)
            .finish();
        assert_eq!(d, "M120,150 Q150,180 180,150");
    }
}
