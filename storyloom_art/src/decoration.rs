// Randomly scattered background ornaments.
//
// Both composers sprinkle small translucent circles across their background.
// The two uses differ only in size/opacity ranges and in how each circle is
// colored: the scene picks from the decorative palette per circle, the
// portrait paints every circle in the character's role color.

use storyloom_prng::RandomSource;

use crate::geometry::{Num, Pct};
use crate::palette::{Color, Palette};
use crate::svg::{Element, circle};

/// Size and opacity ranges for one family of ornaments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationStyle {
    pub radius: (f64, f64),
    pub opacity: (f64, f64),
}

impl DecorationStyle {
    /// Scene background: tiny, faint to medium.
    pub const SCENE: DecorationStyle = DecorationStyle {
        radius: (0.5, 3.5),
        opacity: (0.1, 0.4),
    };

    /// Portrait background: slightly larger, fainter.
    pub const PORTRAIT: DecorationStyle = DecorationStyle {
        radius: (1.0, 4.0),
        opacity: (0.1, 0.3),
    };
}

/// How each ornament picks its fill.
#[derive(Clone, Copy, Debug)]
pub enum DecorationColor<'a> {
    /// A fresh uniform pick from the decorative palette per ornament.
    RandomPalette(Palette<'a>),
    /// The same color for every ornament.
    Fixed(&'a Color),
}

/// Produce `count` circles at uniform random positions across the canvas.
///
/// Draw order per circle: x, y, radius, opacity, then the palette pick (if
/// any). Tests with a `FixedSequence` rely on that order.
pub fn scatter_decorations<R: RandomSource + ?Sized>(
    count: usize,
    style: &DecorationStyle,
    color: DecorationColor<'_>,
    rng: &mut R,
) -> Vec<Element> {
    (0..count)
        .map(|_| {
            let x = rng.range_f64(0.0, 100.0);
            let y = rng.range_f64(0.0, 100.0);
            let r = rng.range_f64(style.radius.0, style.radius.1);
            let opacity = rng.range_f64(style.opacity.0, style.opacity.1);
            let fill = match color {
                DecorationColor::RandomPalette(palette) => palette.random_color(rng),
                DecorationColor::Fixed(c) => c,
            };
            circle(Pct(x), Pct(y), Num(r))
                .attr("class", "decoration")
                .attr("fill", fill)
                .attr("opacity", Num(opacity))
        })
        .collect()
}
