//! Operator selection inputs.

use serde::{Deserialize, Serialize};

use crate::catalog::AreaThemeMap;

/// Include sentinel: select the whole universe.
pub const INCLUDE_ALL: &str = "all";

/// Exclude sentinel: exclude nothing.
pub const EXCLUDE_NONE: &str = "none";

/// Include/exclude lists for one entity kind.
///
/// A list counts as its sentinel when its first element is the sentinel
/// or when it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            include: vec![INCLUDE_ALL.to_string()],
            exclude: vec![EXCLUDE_NONE.to_string()],
        }
    }
}

impl Selection {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Selection narrowed to the given identifiers.
    pub fn including<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(ids, [EXCLUDE_NONE])
    }

    /// Selection of everything except the given identifiers.
    pub fn excluding<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new([INCLUDE_ALL], ids)
    }

    pub fn includes_all(&self) -> bool {
        self.include.first().map_or(true, |s| s == INCLUDE_ALL)
    }

    pub fn excludes_none(&self) -> bool {
        self.exclude.first().map_or(true, |s| s == EXCLUDE_NONE)
    }
}

/// Selections for every entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSpec {
    #[serde(default)]
    pub areas: Selection,
    #[serde(default)]
    pub themes: Selection,
    #[serde(default)]
    pub locales: Selection,
}

/// The resolved deployable sets, ready for enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPlan {
    /// Deployable locales, in resolution order.
    pub locales: Vec<String>,
    /// Deployable areas with their surviving themes. Areas with no
    /// surviving theme are absent.
    pub area_themes: AreaThemeMap,
    /// Union of all surviving per-area themes.
    pub requested_themes: Vec<String>,
}

impl DeployPlan {
    pub fn areas(&self) -> Vec<&str> {
        self.area_themes.areas().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_sentinel() {
        let selection = Selection::default();
        assert!(selection.includes_all());
        assert!(selection.excludes_none());
    }

    #[test]
    fn test_empty_lists_count_as_sentinels() {
        let selection = Selection::new(Vec::<String>::new(), Vec::<String>::new());
        assert!(selection.includes_all());
        assert!(selection.excludes_none());
    }

    #[test]
    fn test_sentinels_are_case_sensitive() {
        let selection = Selection::new(["ALL"], ["None"]);
        assert!(!selection.includes_all());
        assert!(!selection.excludes_none());
    }

    #[test]
    fn test_builders() {
        let include = Selection::including(["frontend"]);
        assert!(!include.includes_all());
        assert!(include.excludes_none());

        let exclude = Selection::excluding(["adminhtml"]);
        assert!(exclude.includes_all());
        assert!(!exclude.excludes_none());
    }
}
