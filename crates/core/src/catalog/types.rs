//! Types for the discovered asset catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale that is always part of the discovered locale universe.
pub const DEFAULT_LOCALE: &str = "en_US";

/// One dimension along which deployable work is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Area,
    Theme,
    Locale,
}

impl EntityKind {
    /// Plural noun used in operator-facing messages.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Area => "areas",
            Self::Theme => "themes",
            Self::Locale => "languages",
        }
    }

    /// Name of the include option, with its short alias.
    pub fn include_option(&self) -> &'static str {
        match self {
            Self::Area => "--area (-a)",
            Self::Theme => "--theme (-t)",
            Self::Locale => "--language (-l)",
        }
    }

    /// Name of the exclude option.
    pub fn exclude_option(&self) -> &'static str {
        match self {
            Self::Area => "--exclude-area",
            Self::Theme => "--exclude-theme",
            Self::Locale => "--exclude-language",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area => write!(f, "area"),
            Self::Theme => write!(f, "theme"),
            Self::Locale => write!(f, "locale"),
        }
    }
}

/// A known static-asset source location.
///
/// `theme` and `locale` are empty for entries they don't apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub area: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub locale: String,
}

impl CatalogEntry {
    pub fn new(
        area: impl Into<String>,
        theme: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            theme: theme.into(),
            locale: locale.into(),
        }
    }
}

/// Mapping of area to the themes it owns, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaThemeMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AreaThemeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `theme` under `area`. Duplicates are ignored.
    pub fn insert(&mut self, area: &str, theme: &str) {
        match self.entries.iter_mut().find(|(a, _)| a == area) {
            Some((_, themes)) => {
                if !themes.iter().any(|t| t == theme) {
                    themes.push(theme.to_string());
                }
            }
            None => self
                .entries
                .push((area.to_string(), vec![theme.to_string()])),
        }
    }

    /// Themes recorded for `area`, if any.
    pub fn themes(&self, area: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(a, _)| a == area)
            .map(|(_, themes)| themes.as_slice())
    }

    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(a, _)| a.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(a, themes)| (a.as_str(), themes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for AreaThemeMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (area, themes) in iter {
            for theme in themes {
                map.insert(&area, &theme);
            }
        }
        map
    }
}

/// Everything discovered in the source tree, per entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityUniverse {
    pub areas: Vec<String>,
    pub themes: Vec<String>,
    pub locales: Vec<String>,
    pub area_themes: AreaThemeMap,
}

impl Default for EntityUniverse {
    fn default() -> Self {
        Self {
            areas: Vec::new(),
            themes: Vec::new(),
            locales: vec![DEFAULT_LOCALE.to_string()],
            area_themes: AreaThemeMap::new(),
        }
    }
}

impl EntityUniverse {
    /// Builds the universe from discovered catalog entries.
    ///
    /// Areas are only recorded for entries carrying a theme. The default
    /// locale is always the first locale.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a CatalogEntry>) -> Self {
        let mut universe = Self::default();

        for entry in entries {
            if !entry.theme.is_empty() {
                universe.area_themes.insert(&entry.area, &entry.theme);
                if !entry.area.is_empty() {
                    push_unique(&mut universe.areas, &entry.area);
                }
                push_unique(&mut universe.themes, &entry.theme);
            }
            if !entry.locale.is_empty() {
                push_unique(&mut universe.locales, &entry.locale);
            }
        }

        universe
    }

    /// Discovered identifiers for one entity kind.
    pub fn entities(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Area => &self.areas,
            EntityKind::Theme => &self.themes,
            EntityKind::Locale => &self.locales,
        }
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.entities(kind).iter().any(|e| e == id)
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
