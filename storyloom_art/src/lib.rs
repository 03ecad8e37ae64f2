// Storyloom Illustration Generator
//
// Turns a generated story (title, text, cast) into vector artwork: one
// 800x500 scene for the whole story and one 300x300 portrait per character.
// Scenery is picked by keyword-matching the story text; characters become
// simple humanoid glyphs colored by narrative role.
//
// Architecture:
// - geometry.rs: Canvases, percent/user-unit conversion, number formatting
// - svg.rs: Structured element tree with escaping serializer
// - palette.rs: Colors, narrative roles, role-to-color lookup
// - config.rs: `ArtConfig` (JSON-loadable colors + matching mode)
// - decoration.rs: Randomly scattered background ornaments
// - motif.rs: Keyword-driven scenery motif detection
// - scene.rs: Full-story scene composer
// - portrait.rs: Single-character portrait composer
// - story.rs: Story and character records as the story generator emits them
// - illustrator.rs: Service boundary, parallel batches, writing to disk
// - error.rs: `ArtError`
//
// Every random draw goes through `storyloom_prng::RandomSource`, so output
// is deterministic given a seeded `ArtRng` (or exact with `FixedSequence`).

pub mod config;
pub mod decoration;
pub mod error;
pub mod geometry;
pub mod illustrator;
pub mod motif;
pub mod palette;
pub mod portrait;
pub mod scene;
pub mod story;
pub mod svg;

pub use config::ArtConfig;
pub use error::{ArtError, Result};
pub use illustrator::{IllustratedStory, Illustrator};
pub use motif::{KeywordMatching, Motif, MotifSet, detect_motifs, detect_motifs_with};
pub use palette::{Color, Palette, Role};
pub use portrait::{compose_portrait, compose_portrait_random};
pub use scene::{compose_scene, compose_scene_random};
pub use story::{CharacterInfo, StoryDraft};
