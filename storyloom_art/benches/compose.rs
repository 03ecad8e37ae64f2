// Benchmarks for scene and portrait composition.
//
// `scene_full` exercises every scenery motif plus a capped cast, the most
// expensive scene input. `batch_16` measures the rayon fan-out in
// `Illustrator::illustrate_batch`.
//
// Run with: cargo bench -p storyloom_art

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use storyloom_art::{
    ArtConfig, CharacterInfo, Illustrator, StoryDraft, compose_portrait, compose_scene,
};
use storyloom_prng::ArtRng;

const ALL_MOTIFS: &str = "A castle on the mountain above a forest village by the sea.";

fn cast() -> Vec<CharacterInfo> {
    vec![
        CharacterInfo::new("Mira", "protagonist").with_traits(["brave", "kind", "stubborn"]),
        CharacterInfo::new("Thorn", "antagonist").with_traits(["cunning"]),
        CharacterInfo::new("Gus", "supporting"),
        CharacterInfo::new("Wren", "supporting"),
    ]
}

fn bench_scene(c: &mut Criterion) {
    let config = ArtConfig::default();
    let characters = cast();
    let mut rng = ArtRng::new(42);
    c.bench_function("scene_full", |b| {
        b.iter(|| {
            compose_scene(
                black_box("Bench"),
                black_box(ALL_MOTIFS),
                &characters,
                &config,
                &mut rng,
            )
        })
    });
    c.bench_function("scene_empty", |b| {
        b.iter(|| compose_scene("", black_box(""), &[], &config, &mut rng))
    });
}

fn bench_portrait(c: &mut Criterion) {
    let config = ArtConfig::default();
    let characters = cast();
    let hero = &characters[0];
    let mut rng = ArtRng::new(42);
    c.bench_function("portrait", |b| {
        b.iter(|| compose_portrait(black_box(hero), &config, &mut rng))
    });
}

fn bench_batch(c: &mut Criterion) {
    let drafts: Vec<StoryDraft> = (0..16)
        .map(|i| StoryDraft {
            title: format!("Story {i}"),
            content: ALL_MOTIFS.to_string(),
            characters: cast(),
        })
        .collect();
    let illustrator = Illustrator::default();
    c.bench_function("batch_16", |b| {
        b.iter(|| illustrator.illustrate_batch(black_box(&drafts), 7))
    });
}

criterion_group!(benches, bench_scene, bench_portrait, bench_batch);
criterion_main!(benches);
