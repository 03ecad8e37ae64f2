// Story illustration service.
//
// `Illustrator` is the boundary the rest of Storyloom talks to: hand it a
// `StoryDraft` and get back the scene markup plus one portrait per character.
// The scene only has room for the first three characters, but every
// character gets a portrait, matching what the story creation flow stores.
//
// Batches fan out over rayon. Each draft gets its own `ArtRng` forked from
// the batch seed and the draft's index, so a seeded batch renders the same
// bytes regardless of how rayon schedules it.
//
// Writing to disk is kept separate (`IllustratedStory::write_to_dir`) so the
// composers themselves never touch the filesystem.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use storyloom_prng::{ArtRng, RandomSource};

use crate::config::ArtConfig;
use crate::error::{ArtError, Result};
use crate::portrait::compose_portrait;
use crate::scene::compose_scene;
use crate::story::{CharacterInfo, StoryDraft};

/// Rendered markup for one story.
#[derive(Clone, Debug, PartialEq)]
pub struct IllustratedStory {
    pub scene_svg: String,
    /// One portrait per character, in input order.
    pub portraits: Vec<(CharacterInfo, String)>,
}

#[derive(Clone, Debug, Default)]
pub struct Illustrator {
    config: ArtConfig,
}

impl Illustrator {
    pub fn new(config: ArtConfig) -> Self {
        Self { config }
    }

    /// Render the scene, then each portrait, drawing from `rng` in that order.
    pub fn illustrate<R: RandomSource + ?Sized>(
        &self,
        draft: &StoryDraft,
        rng: &mut R,
    ) -> IllustratedStory {
        let scene_svg = compose_scene(
            &draft.title,
            &draft.content,
            &draft.characters,
            &self.config,
            rng,
        );
        let portraits = draft
            .characters
            .iter()
            .map(|c| (c.clone(), compose_portrait(c, &self.config, rng)))
            .collect::<Vec<_>>();
        tracing::debug!(
            characters = draft.characters.len(),
            scene_bytes = scene_svg.len(),
            "illustrated story"
        );
        IllustratedStory {
            scene_svg,
            portraits,
        }
    }

    /// Render many drafts in parallel. Output order matches input order.
    pub fn illustrate_batch(&self, drafts: &[StoryDraft], seed: u64) -> Vec<IllustratedStory> {
        tracing::info!(drafts = drafts.len(), seed, "illustrating batch");
        drafts
            .par_iter()
            .enumerate()
            .map(|(i, draft)| {
                let mut rng = ArtRng::fork(seed, i as u64);
                self.illustrate(draft, &mut rng)
            })
            .collect()
    }
}

impl IllustratedStory {
    /// Write `scene.svg` and `portrait-<n>-<slug>.svg` files into `dir`,
    /// creating it if needed. Returns the paths written, scene first.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir).map_err(|source| ArtError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(1 + self.portraits.len());
        let scene_path = dir.join("scene.svg");
        write_file(&scene_path, &self.scene_svg)?;
        written.push(scene_path);

        for (n, (character, svg)) in self.portraits.iter().enumerate() {
            let path = dir.join(format!("portrait-{}-{}.svg", n + 1, slug(&character.name)));
            write_file(&path, svg)?;
            written.push(path);
        }
        tracing::info!(dir = %dir.display(), files = written.len(), "wrote illustrations");
        Ok(written)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| ArtError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Lowercase ASCII alphanumerics joined by single dashes. Names with no
/// usable characters become `character`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("character");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(names: &[&str]) -> StoryDraft {
        StoryDraft {
            title: "T".into(),
            content: "a quiet forest".into(),
            characters: names
                .iter()
                .map(|n| CharacterInfo::new(*n, "supporting"))
                .collect(),
        }
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Mira"), "mira");
        assert_eq!(slug("Sir  Thorn, the Bold!"), "sir-thorn-the-bold");
        assert_eq!(slug("  --  "), "character");
        assert_eq!(slug("Élodie"), "lodie");
    }

    #[test]
    fn every_character_gets_a_portrait() {
        let ill = Illustrator::default();
        let out = ill.illustrate(&draft(&["A", "B", "C", "D", "E"]), &mut ArtRng::new(1));
        assert_eq!(out.portraits.len(), 5);
        assert_eq!(out.scene_svg.matches(r#"class="character""#).count(), 3);
        assert_eq!(out.portraits[4].0.name, "E");
    }

    #[test]
    fn seeded_batch_is_reproducible() {
        let ill = Illustrator::default();
        let drafts = vec![draft(&["A"]), draft(&["B", "C"]), draft(&[])];
        let first = ill.illustrate_batch(&drafts, 42);
        let second = ill.illustrate_batch(&drafts, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[1].portraits.len(), 2);
        // Identical drafts at different indices draw from different streams.
        let twins = ill.illustrate_batch(&[draft(&["A"]), draft(&["A"])], 7);
        assert_ne!(twins[0].scene_svg, twins[1].scene_svg);
    }

    #[test]
    fn batch_entry_matches_single_render_with_forked_rng() {
        let ill = Illustrator::default();
        let drafts = vec![draft(&["A"]), draft(&["B"])];
        let batch = ill.illustrate_batch(&drafts, 9);
        let single = ill.illustrate(&drafts[1], &mut ArtRng::fork(9, 1));
        assert_eq!(batch[1], single);
    }

    #[test]
    fn writes_scene_and_portraits() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested/out");
        let ill = Illustrator::default();
        let story = ill.illustrate(&draft(&["Mira", "Old Gus"]), &mut ArtRng::new(3));
        let paths = story.write_to_dir(&out_dir).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["scene.svg", "portrait-1-mira.svg", "portrait-2-old-gus.svg"]
        );
        let scene = std::fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(scene, story.scene_svg);
    }

    #[test]
    fn write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let story = Illustrator::default().illustrate(&draft(&[]), &mut ArtRng::new(4));
        let err = story.write_to_dir(&blocker.join("sub")).unwrap_err();
        assert!(matches!(err, ArtError::Write { .. }));
        assert!(err.to_string().contains("file"));
    }
}
