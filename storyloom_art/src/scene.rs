// Full-story scene composition.
//
// Builds the 800x500 story illustration in four layers, back to front:
//
// 1. Background: diagonal two-stop gradient plus 20 scattered ornaments in
//    random palette colors.
// 2. Ground strip: always drawn, whatever the text says.
// 3. Scenery: one block per detected motif, in the fixed draw order of
//    `Motif::ALL` (mountain, forest, ocean, settlement, castle), so e.g. the
//    castle always sits on top of the ocean band.
// 4. Characters: up to three humanoid glyphs evenly spaced along the
//    baseline. Extra characters are dropped without complaint. Glyphs may
//    overlap; there is no collision avoidance.
//
// Every block is a `<g>` whose `class` names what it is (`scenery-ocean`,
// `character`, ...), which is how callers and tests count structure without
// caring about the random parts.
//
// See also: `motif.rs` for keyword detection, `decoration.rs` for the
// ornaments, `portrait.rs` for the per-character avatar.

use storyloom_prng::{ArtRng, RandomSource};

use crate::config::ArtConfig;
use crate::decoration::{DecorationColor, DecorationStyle, scatter_decorations};
use crate::geometry::{Canvas, Num, Pct};
use crate::motif::{Motif, detect_motifs_with};
use crate::palette::Palette;
use crate::story::CharacterInfo;
use crate::svg::{Document, Element, circle, group, line, path, polygon, rect};

/// Most character glyphs a scene will draw.
pub const MAX_SCENE_CHARACTERS: usize = 3;

const SCENE_DECORATIONS: usize = 20;
const GROUND_Y: f64 = 75.0;
const WAVE_COLOR: &str = "#FFFFFF";

const TREE_COUNT: usize = 10;
const WAVE_COUNT: usize = 8;
const BUILDING_COUNT: usize = 7;
const WINDOWS_PER_BUILDING: usize = 3;

const LABEL_FONT_SIZE: f64 = 12.0;

/// Compose a scene with an explicit random source.
///
/// `title` is accepted for parity with the story record but is not drawn.
pub fn compose_scene<R: RandomSource + ?Sized>(
    title: &str,
    story_text: &str,
    characters: &[CharacterInfo],
    config: &ArtConfig,
    rng: &mut R,
) -> String {
    scene_document(title, story_text, characters, config, rng).render()
}

/// Compose a scene using a freshly entropy-seeded generator.
pub fn compose_scene_random(
    title: &str,
    story_text: &str,
    characters: &[CharacterInfo],
    config: &ArtConfig,
) -> String {
    compose_scene(title, story_text, characters, config, &mut ArtRng::from_entropy())
}

/// Build the scene as an element tree without serializing it.
pub fn scene_document<R: RandomSource + ?Sized>(
    title: &str,
    story_text: &str,
    characters: &[CharacterInfo],
    config: &ArtConfig,
    rng: &mut R,
) -> Document {
    let canvas = Canvas::SCENE;
    let palette = Palette::new(config);
    let motifs = detect_motifs_with(story_text, config.keyword_matching);

    let mut doc = Document::new(canvas);
    doc.extend(background(config, palette, rng));
    doc.push(ground(config));
    for motif in motifs.iter() {
        doc.push(scenery(motif, canvas, config, rng));
    }

    let cast = &characters[..characters.len().min(MAX_SCENE_CHARACTERS)];
    for (i, character) in cast.iter().enumerate() {
        doc.push(character_glyph(character, i, cast.len(), canvas, palette, config));
    }

    tracing::debug!(
        title_len = title.len(),
        text_len = story_text.len(),
        motifs = motifs.len(),
        glyphs = cast.len(),
        dropped = characters.len() - cast.len(),
        "composed scene"
    );
    doc
}

fn background<R: RandomSource + ?Sized>(
    config: &ArtConfig,
    palette: Palette<'_>,
    rng: &mut R,
) -> Vec<Element> {
    let gradient = Element::new("linearGradient")
        .attr("id", "bg-gradient")
        .attr("x1", "0%")
        .attr("y1", "0%")
        .attr("x2", "100%")
        .attr("y2", "100%")
        .child(
            Element::new("stop")
                .attr("offset", "0%")
                .attr("stop-color", &config.paper),
        )
        .child(
            Element::new("stop")
                .attr("offset", "100%")
                .attr("stop-color", &config.gradient_end),
        );
    let defs = Element::new("defs").child(gradient);
    let fill = Element::new("rect")
        .attr("class", "background")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("fill", "url(#bg-gradient)");
    let ornaments = group("decorations").children(scatter_decorations(
        SCENE_DECORATIONS,
        &DecorationStyle::SCENE,
        DecorationColor::RandomPalette(palette),
        rng,
    ));
    vec![defs, fill, ornaments]
}

fn ground(config: &ArtConfig) -> Element {
    group("scenery-ground").child(
        rect(0, Pct(GROUND_Y), "100%", Pct(100.0 - GROUND_Y))
            .attr("fill", &config.scenery)
            .attr("opacity", 0.2),
    )
}

fn scenery<R: RandomSource + ?Sized>(
    motif: Motif,
    canvas: Canvas,
    config: &ArtConfig,
    rng: &mut R,
) -> Element {
    let block = group(&format!("scenery-{}", motif.as_str()));
    match motif {
        Motif::Mountain => block.children(mountains(canvas, config)),
        Motif::Forest => block.children(forest(config, rng)),
        Motif::Ocean => block.children(ocean(canvas, config)),
        Motif::Settlement => block.children(settlement(config, rng)),
        Motif::Castle => block.children(castle(config)),
    }
}

fn mountains(canvas: Canvas, config: &ArtConfig) -> Vec<Element> {
    let near = [
        (0.0, GROUND_Y),
        (15.0, 40.0),
        (30.0, 65.0),
        (45.0, 35.0),
        (60.0, GROUND_Y),
    ];
    let far = [
        (60.0, GROUND_Y),
        (75.0, 45.0),
        (90.0, 55.0),
        (100.0, 65.0),
        (100.0, GROUND_Y),
    ];
    vec![
        polygon(canvas.points(&near))
            .attr("fill", &config.ink)
            .attr("opacity", 0.7),
        polygon(canvas.points(&far))
            .attr("fill", &config.ink)
            .attr("opacity", 0.5),
    ]
}

/// Ten trees evenly spaced from 10% to 82%, canopy radius 10-15 units.
fn forest<R: RandomSource + ?Sized>(config: &ArtConfig, rng: &mut R) -> Vec<Element> {
    let y = 70.0;
    (0..TREE_COUNT)
        .map(|i| {
            let x = 10.0 + i as f64 * 8.0;
            let canopy = rng.range_f64(10.0, 15.0);
            group("tree")
                .child(
                    circle(Pct(x), Pct(y), Num(canopy))
                        .attr("fill", &config.scenery)
                        .attr("opacity", 0.8),
                )
                .child(
                    rect(Pct(x - 1.0), Pct(y), "2%", "5%")
                        .attr("fill", &config.ink)
                        .attr("opacity", 0.8),
                )
        })
        .collect()
}

/// Translucent water band plus eight wave crests spanning the width.
fn ocean(canvas: Canvas, config: &ArtConfig) -> Vec<Element> {
    let band = rect(0, "70%", "100%", "30%")
        .attr("fill", &config.scenery)
        .attr("opacity", 0.6);
    let step = 100.0 / WAVE_COUNT as f64;
    let waves = (0..WAVE_COUNT).map(|i| {
        let x0 = i as f64 * step;
        let d = canvas
            .path()
            .move_to(x0, GROUND_Y)
            .quad_to(x0 + step / 2.0, 70.0, x0 + step, GROUND_Y)
            .finish();
        path(d)
            .attr("class", "wave")
            .attr("stroke", WAVE_COLOR)
            .attr("fill", "none")
            .attr("stroke-width", 1)
            .attr("opacity", 0.5)
    });
    std::iter::once(band).chain(waves).collect()
}

/// Seven buildings at 10% spacing with random height and width, three lit
/// windows each. Random draws per building: height, then width.
fn settlement<R: RandomSource + ?Sized>(config: &ArtConfig, rng: &mut R) -> Vec<Element> {
    (0..BUILDING_COUNT)
        .map(|i| {
            let x = 20.0 + i as f64 * 10.0;
            let height = rng.range_f64(10.0, 25.0);
            let width = rng.range_f64(5.0, 8.0);
            let top = GROUND_Y - height;
            let windows = (0..WINDOWS_PER_BUILDING).map(|j| {
                rect(Pct(x + 1.0), Pct(top + 2.0 + j as f64 * 5.0), "1.5%", "2%")
                    .attr("fill", &config.window)
                    .attr("opacity", 0.8)
            });
            group("building")
                .child(
                    rect(Pct(x), Pct(top), Pct(width), Pct(height))
                        .attr("fill", &config.ink)
                        .attr("opacity", 0.7),
                )
                .children(windows)
        })
        .collect()
}

/// Fixed fortress: wall, battlements, two towers, door, two windows.
fn castle(config: &ArtConfig) -> Vec<Element> {
    let stone = |x: f64, y: f64, w: f64, h: f64| {
        rect(Pct(x), Pct(y), Pct(w), Pct(h))
            .attr("fill", &config.ink)
            .attr("opacity", 0.8)
    };
    vec![
        stone(40.0, 45.0, 20.0, 30.0),
        stone(38.0, 42.0, 24.0, 3.0),
        stone(43.0, 35.0, 4.0, 10.0),
        stone(53.0, 35.0, 4.0, 10.0),
        rect("48%", "55%", "4%", "7%")
            .attr("fill", &config.paper)
            .attr("opacity", 0.9),
        rect("42%", "50%", "3%", "3%")
            .attr("fill", &config.window)
            .attr("opacity", 0.7),
        rect("55%", "50%", "3%", "3%")
            .attr("fill", &config.window)
            .attr("opacity", 0.7),
    ]
}

/// Horizontal center of glyph `index` among `count`, in percent.
pub fn glyph_center(index: usize, count: usize) -> f64 {
    let spacing = 100.0 / (count as f64 + 1.0);
    spacing * (index as f64 + 1.0)
}

fn character_glyph(
    character: &CharacterInfo,
    index: usize,
    count: usize,
    canvas: Canvas,
    palette: Palette<'_>,
    config: &ArtConfig,
) -> Element {
    let x = glyph_center(index, count);
    let body_color = palette.role_color(&character.role);
    let ink = &config.ink;

    let limb = |x1: f64, y1: f64, x2: f64, y2: f64| {
        line(Pct(x1), Pct(y1), Pct(x2), Pct(y2))
            .attr("stroke", body_color)
            .attr("stroke-width", 2)
    };
    let mouth = canvas
        .path()
        .move_to(x - 2.0, 62.0)
        .quad_to(x, 64.0, x + 2.0, 62.0)
        .finish();

    group("character")
        .attr("data-role", character.role().as_str())
        .attr("data-name", &character.name)
        .child(circle(Pct(x), "60%", 8).attr("fill", body_color))
        .child(
            rect(Pct(x - 5.0), "68%", "10%", "12%")
                .attr("fill", body_color)
                .attr("opacity", 0.8),
        )
        .child(limb(x - 5.0, 72.0, x - 10.0, GROUND_Y))
        .child(limb(x + 5.0, 72.0, x + 10.0, GROUND_Y))
        .child(limb(x - 2.0, 80.0, x - 2.0, 90.0))
        .child(limb(x + 2.0, 80.0, x + 2.0, 90.0))
        .child(circle(Pct(x - 2.0), "58%", 1).attr("fill", ink))
        .child(circle(Pct(x + 2.0), "58%", 1).attr("fill", ink))
        .child(
            path(mouth)
                .attr("stroke", ink)
                .attr("fill", "none")
                .attr("stroke-width", 1),
        )
        .child(
            Element::new("text")
                .attr("x", Pct(x))
                .attr("y", "95%")
                .attr("text-anchor", "middle")
                .attr("font-family", "Arial")
                .attr("font-size", Num(LABEL_FONT_SIZE))
                .attr("fill", ink)
                .text(character.name.as_str()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_prng::FixedSequence;

    fn cast(n: usize) -> Vec<CharacterInfo> {
        (0..n)
            .map(|i| CharacterInfo::new(format!("C{i}"), "supporting"))
            .collect()
    }

    #[test]
    fn glyph_spacing_is_even() {
        assert_eq!(glyph_center(0, 1), 50.0);
        assert_eq!(glyph_center(0, 3), 25.0);
        assert_eq!(glyph_center(1, 3), 50.0);
        assert_eq!(glyph_center(2, 3), 75.0);
    }

    #[test]
    fn glyph_count_is_capped_at_three() {
        let config = ArtConfig::default();
        let mut rng = ArtRng::new(1);
        for n in 0..=10 {
            let doc = scene_document("t", "", &cast(n), &config, &mut rng);
            assert_eq!(doc.root().count_class("character"), n.min(3), "n = {n}");
        }
    }

    #[test]
    fn empty_inputs_give_minimal_scene() {
        let config = ArtConfig::default();
        let mut rng = ArtRng::new(2);
        let doc = scene_document("", "", &[], &config, &mut rng);
        let root = doc.root();
        assert_eq!(root.count_class("scenery-ground"), 1);
        assert_eq!(root.count_class("decoration"), SCENE_DECORATIONS);
        for motif in Motif::ALL {
            assert_eq!(root.count_class(&format!("scenery-{}", motif.as_str())), 0);
        }
        let svg = doc.render();
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn scenery_blocks_follow_draw_order() {
        let config = ArtConfig::default();
        let mut rng = ArtRng::new(3);
        let doc = scene_document(
            "",
            "castle by the sea under a mountain near a forest village",
            &[],
            &config,
            &mut rng,
        );
        let classes: Vec<&str> = doc
            .root()
            .child_elements()
            .filter_map(|e| e.get_attr("class"))
            .filter(|c| c.starts_with("scenery-"))
            .collect();
        assert_eq!(
            classes,
            vec![
                "scenery-ground",
                "scenery-mountain",
                "scenery-forest",
                "scenery-ocean",
                "scenery-settlement",
                "scenery-castle",
            ]
        );
    }

    #[test]
    fn recipes_have_fixed_element_counts() {
        let config = ArtConfig::default();
        let mut rng = ArtRng::new(4);
        let doc = scene_document("", "forest ocean village", &[], &config, &mut rng);
        let root = doc.root();
        assert_eq!(root.count_class("tree"), TREE_COUNT);
        assert_eq!(root.count_class("wave"), WAVE_COUNT);
        assert_eq!(root.count_class("building"), BUILDING_COUNT);
    }

    #[test]
    fn forest_canopy_uses_random_radius() {
        let config = ArtConfig::default();
        let mut seq = FixedSequence::constant(0.5);
        let trees = forest(&config, &mut seq);
        let canopy = trees[0].child_elements().next().unwrap();
        assert_eq!(canopy.get_attr("r"), Some("12.5"));
        assert_eq!(canopy.get_attr("cx"), Some("10%"));
        let last = trees[TREE_COUNT - 1].child_elements().next().unwrap();
        assert_eq!(last.get_attr("cx"), Some("82%"));
    }

    #[test]
    fn settlement_windows_stack_down_from_roof() {
        let config = ArtConfig::default();
        let mut seq = FixedSequence::new(vec![0.0, 0.0]);
        let buildings = settlement(&config, &mut seq);
        let first: Vec<&Element> = buildings[0].child_elements().collect();
        // Minimum height 10% puts the roof at 65%.
        assert_eq!(first[0].get_attr("y"), Some("65%"));
        assert_eq!(first[0].get_attr("width"), Some("5%"));
        assert_eq!(first.len(), 1 + WINDOWS_PER_BUILDING);
        assert_eq!(first[1].get_attr("y"), Some("67%"));
        assert_eq!(first[3].get_attr("y"), Some("77%"));
    }

    #[test]
    fn mountain_polygons_use_user_units() {
        let config = ArtConfig::default();
        let peaks = mountains(Canvas::SCENE, &config);
        assert_eq!(
            peaks[0].get_attr("points"),
            Some("0,375 120,200 240,325 360,175 480,375")
        );
    }

    #[test]
    fn glyph_uses_role_color_and_escapes_name() {
        let config = ArtConfig::default();
        let mut rng = ArtRng::new(5);
        let chars = vec![CharacterInfo::new("Tom & <Jerry>", "Antagonist")];
        let doc = scene_document("", "", &chars, &config, &mut rng);
        let mut glyphs = Vec::new();
        doc.root().find_class("character", &mut glyphs);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].get_attr("data-role"), Some("antagonist"));
        let head = glyphs[0].child_elements().next().unwrap();
        assert_eq!(head.get_attr("fill"), Some("#FF6B6B"));
        assert_eq!(head.get_attr("cx"), Some("50%"));
        let svg = doc.render();
        assert!(svg.contains(">Tom &amp; &lt;Jerry&gt;</text>"));
        assert!(!svg.contains("<Jerry>"));
    }

    #[test]
    fn gradient_runs_corner_to_corner() {
        let config = ArtConfig::default();
        let mut rng = ArtRng::new(6);
        let svg = compose_scene("", "", &[], &config, &mut rng);
        assert!(svg.contains(
            r#"<linearGradient id="bg-gradient" x1="0%" y1="0%" x2="100%" y2="100%">"#
        ));
        assert!(svg.contains(r#"fill="url(#bg-gradient)""#));
    }
}
