// Colors, narrative roles, and the palette lookups shared by both composers.
//
// `Role::from_label` is total: any string maps to exactly one of the three
// roles, with anything other than protagonist/antagonist (case-insensitive)
// landing in `Supporting`. `Palette` pairs the role colors with the
// decorative palette used for non-semantic background ornaments.
//
// See also: `config.rs` for where the colors come from, `decoration.rs` for
// the ornaments that consume `Palette::random_color`.

use std::fmt;

use serde::{Deserialize, Serialize};
use storyloom_prng::RandomSource;

use crate::config::ArtConfig;
use crate::error::ArtError;

/// A validated hex color (`#RGB` or `#RRGGBB`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(s: &str) -> Result<Self, ArtError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ArtError::InvalidColor(s.to_string()))?;
        let valid_len = hex.len() == 3 || hex.len() == 6;
        if !valid_len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ArtError::InvalidColor(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Build from a string known to be valid at compile time.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(Self::parse(s).is_ok(), "bad built-in color {s}");
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = ArtError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A character's narrative role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Protagonist,
    Antagonist,
    #[default]
    Supporting,
}

impl Role {
    /// Map a free-form role label onto a role. Never fails.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("protagonist") {
            Role::Protagonist
        } else if label.eq_ignore_ascii_case("antagonist") {
            Role::Antagonist
        } else {
            Role::Supporting
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Protagonist => "protagonist",
            Role::Antagonist => "antagonist",
            Role::Supporting => "supporting",
        }
    }
}

/// One color per role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleColors {
    pub protagonist: Color,
    pub antagonist: Color,
    pub supporting: Color,
}

impl Default for RoleColors {
    fn default() -> Self {
        Self {
            protagonist: Color::from_static("#4ECDC4"),
            antagonist: Color::from_static("#FF6B6B"),
            supporting: Color::from_static("#FFE66D"),
        }
    }
}

impl RoleColors {
    pub fn for_role(&self, role: Role) -> &Color {
        match role {
            Role::Protagonist => &self.protagonist,
            Role::Antagonist => &self.antagonist,
            Role::Supporting => &self.supporting,
        }
    }
}

/// Borrowed view over the config's colors with the two palette lookups.
#[derive(Clone, Copy, Debug)]
pub struct Palette<'a> {
    decorative: &'a [Color],
    roles: &'a RoleColors,
    fallback: &'a Color,
}

impl<'a> Palette<'a> {
    pub fn new(config: &'a ArtConfig) -> Self {
        Self {
            decorative: &config.palette,
            roles: &config.role_colors,
            fallback: &config.ink,
        }
    }

    /// Color for a role label; unknown labels get the supporting color.
    pub fn role_color(&self, label: &str) -> &'a Color {
        self.roles.for_role(Role::from_label(label))
    }

    /// Uniform pick from the decorative palette.
    ///
    /// An empty palette (only reachable by constructing `ArtConfig` by hand
    /// and skipping validation) falls back to the ink color.
    pub fn random_color<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &'a Color {
        if self.decorative.is_empty() {
            return self.fallback;
        }
        &self.decorative[rng.pick_index(self.decorative.len())]
    }
}
