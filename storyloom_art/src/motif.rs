// Scenery motif detection from story text.
//
// Scans the story body for a fixed keyword list per motif. The default
// matcher is raw case-insensitive substring containment, so "seahorse"
// triggers the ocean motif and "cityscape" the settlement motif. That
// over-match is the long-standing behavior stored illustrations were made
// with. `KeywordMatching::WholeWord` is the opt-in stricter matcher that
// compares against alphanumeric word tokens instead.
//
// `MotifSet` iterates in draw order (mountain, forest, ocean, settlement,
// castle), independent of where keywords appear in the text.

use serde::{Deserialize, Serialize};

/// A thematic scenery category.
///
/// Variant order is draw order: later motifs paint over earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Motif {
    Mountain,
    Forest,
    Ocean,
    Settlement,
    Castle,
}

impl Motif {
    /// Every motif, in draw order.
    pub const ALL: [Motif; 5] = [
        Motif::Mountain,
        Motif::Forest,
        Motif::Ocean,
        Motif::Settlement,
        Motif::Castle,
    ];

    /// Lowercase keywords that trigger this motif.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Motif::Mountain => &["mountain"],
            Motif::Forest => &["forest"],
            Motif::Ocean => &["ocean", "sea"],
            Motif::Settlement => &["city", "village"],
            Motif::Castle => &["castle"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Motif::Mountain => "mountain",
            Motif::Forest => "forest",
            Motif::Ocean => "ocean",
            Motif::Settlement => "settlement",
            Motif::Castle => "castle",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// How keywords are matched against story text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatching {
    /// Case-insensitive substring containment.
    #[default]
    Substring,
    /// Case-insensitive match against whole alphanumeric words.
    WholeWord,
}

/// A set of detected motifs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MotifSet(u8);

impl MotifSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, motif: Motif) {
        self.0 |= motif.bit();
    }

    pub fn contains(&self, motif: Motif) -> bool {
        self.0 & motif.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Motifs present, in draw order.
    pub fn iter(&self) -> impl Iterator<Item = Motif> + '_ {
        Motif::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Motif> for MotifSet {
    fn from_iter<I: IntoIterator<Item = Motif>>(iter: I) -> Self {
        let mut set = MotifSet::empty();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

/// Detect motifs with the default substring matcher.
pub fn detect_motifs(story_text: &str) -> MotifSet {
    detect_motifs_with(story_text, KeywordMatching::Substring)
}

/// Detect motifs with an explicit matching mode.
pub fn detect_motifs_with(story_text: &str, matching: KeywordMatching) -> MotifSet {
    let lower = story_text.to_lowercase();
    let words: Vec<&str> = match matching {
        KeywordMatching::Substring => Vec::new(),
        KeywordMatching::WholeWord => lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect(),
    };

    Motif::ALL
        .into_iter()
        .filter(|m| {
            m.keywords().iter().any(|kw| match matching {
                KeywordMatching::Substring => lower.contains(kw),
                KeywordMatching::WholeWord => words.contains(kw),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ocean() {
        assert!(detect_motifs("They rowed across the ocean").contains(Motif::Ocean));
    }

    #[test]
    fn detects_mountain_village() {
        let set = detect_motifs("A quiet mountain village");
        assert!(set.contains(Motif::Mountain));
        assert!(set.contains(Motif::Settlement));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_text_has_no_motifs() {
        assert!(detect_motifs("").is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let set = detect_motifs("The CASTLE loomed over the Forest");
        assert!(set.contains(Motif::Castle));
        assert!(set.contains(Motif::Forest));
    }

    #[test]
    fn sea_and_city_are_aliases() {
        let set = detect_motifs("a city by the sea");
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Motif::Ocean, Motif::Settlement]
        );
    }

    #[test]
    fn substring_matching_over_matches() {
        assert!(detect_motifs("a seahorse swam by").contains(Motif::Ocean));
        assert!(detect_motifs("the cityscape glowed").contains(Motif::Settlement));
    }

    #[test]
    fn whole_word_matching_skips_embedded_keywords() {
        let set = detect_motifs_with("a seahorse swam by", KeywordMatching::WholeWord);
        assert!(set.is_empty());
        let set = detect_motifs_with("Out to sea, past the village.", KeywordMatching::WholeWord);
        assert!(set.contains(Motif::Ocean));
        assert!(set.contains(Motif::Settlement));
    }

    #[test]
    fn iteration_follows_draw_order_not_text_order() {
        let set = detect_motifs("castle, ocean, forest, mountain, village");
        assert_eq!(set.iter().collect::<Vec<_>>(), Motif::ALL.to_vec());
    }

    #[test]
    fn keyword_matching_serde_names() {
        let m: KeywordMatching = serde_json::from_str("\"whole_word\"").unwrap();
        assert_eq!(m, KeywordMatching::WholeWord);
    }
}
