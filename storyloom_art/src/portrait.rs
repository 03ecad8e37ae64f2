// Standalone character portraits for profile cards.
//
// A 300x300 head-and-shoulders avatar in the character's role color over a
// flat paper background. The background ornaments reuse the role color
// rather than the random palette, so each card reads as one color family.
//
// Up to three traits become accent-colored marker circles on a ring around
// the head: marker `i` sits at angle `45° + i·45°` below the horizontal
// (SVG y grows downward), at 35% of the portrait half-width from the head
// center. Traits past the third are dropped.

use std::f64::consts::FRAC_PI_4;

use storyloom_prng::{ArtRng, RandomSource};

use crate::config::ArtConfig;
use crate::decoration::{DecorationColor, DecorationStyle, scatter_decorations};
use crate::geometry::{Canvas, Num, Pct};
use crate::palette::Palette;
use crate::story::CharacterInfo;
use crate::svg::{Document, Element, circle, group, line, path, rect};

/// Most trait markers a portrait will draw.
pub const MAX_PORTRAIT_TRAITS: usize = 3;

const PORTRAIT_DECORATIONS: usize = 10;
const HEAD_CENTER: (f64, f64) = (50.0, 40.0);
const HEAD_RADIUS: f64 = 50.0;
/// Ring radius in percent: 35% of the half-width (50%).
const TRAIT_RING_RADIUS: f64 = 0.35 * 50.0;
const TRAIT_MARKER_RADIUS: f64 = 10.0;

/// Compose a portrait with an explicit random source.
pub fn compose_portrait<R: RandomSource + ?Sized>(
    character: &CharacterInfo,
    config: &ArtConfig,
    rng: &mut R,
) -> String {
    portrait_document(character, config, rng).render()
}

/// Compose a portrait using a freshly entropy-seeded generator.
pub fn compose_portrait_random(character: &CharacterInfo, config: &ArtConfig) -> String {
    compose_portrait(character, config, &mut ArtRng::from_entropy())
}

/// Build the portrait as an element tree without serializing it.
pub fn portrait_document<R: RandomSource + ?Sized>(
    character: &CharacterInfo,
    config: &ArtConfig,
    rng: &mut R,
) -> Document {
    let canvas = Canvas::PORTRAIT;
    let role_color = Palette::new(config).role_color(&character.role);

    let mut doc = Document::new(canvas);
    doc.push(
        Element::new("rect")
            .attr("class", "background")
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("fill", &config.paper),
    );
    doc.push(group("decorations").children(scatter_decorations(
        PORTRAIT_DECORATIONS,
        &DecorationStyle::PORTRAIT,
        DecorationColor::Fixed(role_color),
        rng,
    )));
    doc.push(avatar(character, canvas, config));

    let shown = character.traits.len().min(MAX_PORTRAIT_TRAITS);
    doc.push(
        group("traits").children(
            character.traits[..shown]
                .iter()
                .enumerate()
                .map(|(i, t)| trait_marker(i, t, config)),
        ),
    );

    tracing::debug!(
        role = character.role().as_str(),
        traits = shown,
        dropped = character.traits.len() - shown,
        "composed portrait"
    );
    doc
}

fn avatar(character: &CharacterInfo, canvas: Canvas, config: &ArtConfig) -> Element {
    let color = Palette::new(config).role_color(&character.role);
    let (hx, hy) = HEAD_CENTER;

    let eye = |x: f64| {
        [
            circle(Pct(x), "35%", 5).attr("fill", &config.paper),
            circle(Pct(x), "35%", 2.5).attr("fill", &config.ink),
        ]
    };
    let arm = |x1: f64, x2: f64| {
        line(Pct(x1), "70%", Pct(x2), "80%")
            .attr("stroke", color)
            .attr("stroke-width", 10)
            .attr("stroke-linecap", "round")
    };
    let mouth = canvas
        .path()
        .move_to(40.0, 50.0)
        .quad_to(50.0, 60.0, 60.0, 50.0)
        .finish();

    group("avatar")
        .attr("data-role", character.role().as_str())
        .attr("data-name", &character.name)
        .child(circle(Pct(hx), Pct(hy), Num(HEAD_RADIUS)).attr("fill", color))
        .children(eye(40.0))
        .children(eye(60.0))
        .child(
            path(mouth)
                .attr("stroke", &config.ink)
                .attr("stroke-width", 3)
                .attr("fill", "none"),
        )
        .child(
            rect("35%", "65%", "30%", 50)
                .attr("rx", 10)
                .attr("fill", color)
                .attr("opacity", 0.8),
        )
        .child(arm(35.0, 20.0))
        .child(arm(65.0, 80.0))
}

/// Position of trait marker `index`, in percent.
pub fn trait_marker_position(index: usize) -> (f64, f64) {
    let angle = index as f64 * FRAC_PI_4 + FRAC_PI_4;
    (
        HEAD_CENTER.0 + TRAIT_RING_RADIUS * angle.cos(),
        HEAD_CENTER.1 + TRAIT_RING_RADIUS * angle.sin(),
    )
}

fn trait_marker(index: usize, label: &str, config: &ArtConfig) -> Element {
    let (x, y) = trait_marker_position(index);
    circle(Pct(x), Pct(y), Num(TRAIT_MARKER_RADIUS))
        .attr("class", "trait-marker")
        .attr("fill", &config.accent)
        .attr("opacity", 0.8)
        .child(Element::new("title").text(label))
}
