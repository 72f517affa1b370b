//! Entity filter resolver.
//!
//! Turns include/exclude lists into validated deployable sets. Every kind
//! is validated before it is resolved; areas first, then locales, then
//! themes.

use thiserror::Error;
use tracing::debug;

use crate::catalog::{AreaThemeMap, EntityKind, EntityUniverse};

use super::types::{DeployPlan, Selection, SelectionSpec};
use super::validator::LocaleValidator;

/// Errors raised while validating operator selections.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Include and exclude are both narrowed for one kind.
    #[error("{include_option} and {exclude_option} cannot be used at the same time")]
    ConflictingSelection {
        kind: EntityKind,
        include_option: &'static str,
        exclude_option: &'static str,
    },

    /// An identifier is not present in (or not valid against) the universe.
    #[error("{id} argument has invalid value, {hint}")]
    UnknownIdentifier {
        kind: EntityKind,
        id: String,
        hint: String,
    },
}

impl SelectionError {
    fn conflicting(kind: EntityKind) -> Self {
        Self::ConflictingSelection {
            kind,
            include_option: kind.include_option(),
            exclude_option: kind.exclude_option(),
        }
    }

    fn unknown(kind: EntityKind, id: &str, available: &[String]) -> Self {
        Self::UnknownIdentifier {
            kind,
            id: id.to_string(),
            hint: format!("available {} are: {}", kind.plural(), available.join(", ")),
        }
    }

    fn invalid_locale(id: &str) -> Self {
        Self::UnknownIdentifier {
            kind: EntityKind::Locale,
            id: id.to_string(),
            hint: "locales must look like language_REGION, e.g. en_US".to_string(),
        }
    }

    /// Entity kind the error refers to.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::ConflictingSelection { kind, .. } | Self::UnknownIdentifier { kind, .. } => *kind,
        }
    }
}

/// Resolves selections against a discovered universe.
pub struct EntityFilter<'a> {
    universe: &'a EntityUniverse,
    locale_validator: &'a dyn LocaleValidator,
}

impl<'a> EntityFilter<'a> {
    pub fn new(universe: &'a EntityUniverse, locale_validator: &'a dyn LocaleValidator) -> Self {
        Self {
            universe,
            locale_validator,
        }
    }

    /// Checks mutual exclusion, then membership of every named identifier.
    pub fn validate(&self, kind: EntityKind, selection: &Selection) -> Result<(), SelectionError> {
        if !selection.includes_all() && !selection.excludes_none() {
            return Err(SelectionError::conflicting(kind));
        }

        let available = self.universe.entities(kind);

        if !selection.includes_all() {
            for id in &selection.include {
                let known = match kind {
                    EntityKind::Locale => self.locale_validator.is_valid(id),
                    _ => self.universe.contains(kind, id),
                };
                if !known {
                    return Err(match kind {
                        EntityKind::Locale => SelectionError::invalid_locale(id),
                        _ => SelectionError::unknown(kind, id, available),
                    });
                }
            }
        }

        if !selection.excludes_none() {
            let unknown = selection
                .exclude
                .iter()
                .find(|id| !self.universe.contains(kind, id));
            if let Some(id) = unknown {
                return Err(SelectionError::unknown(kind, id, available));
            }
        }

        Ok(())
    }

    /// Computes the deployable set for one kind. Assumes `validate` passed.
    pub fn resolve(&self, kind: EntityKind, selection: &Selection) -> Vec<String> {
        let universe = self.universe.entities(kind);

        if selection.includes_all() && selection.excludes_none() {
            return universe.to_vec();
        }

        if !selection.excludes_none() {
            return universe
                .iter()
                .filter(|id| !selection.exclude.contains(*id))
                .cloned()
                .collect();
        }

        // Locales may be requested before they exist in the source tree.
        if kind == EntityKind::Locale {
            return selection.include.clone();
        }

        universe
            .iter()
            .filter(|id| selection.include.contains(*id))
            .cloned()
            .collect()
    }

    /// Validates and resolves one kind.
    pub fn deployable(
        &self,
        kind: EntityKind,
        selection: &Selection,
    ) -> Result<Vec<String>, SelectionError> {
        self.validate(kind, selection)?;
        let deployable = self.resolve(kind, selection);
        debug!("Deployable {}: {:?}", kind.plural(), deployable);
        Ok(deployable)
    }

    /// Resolves every kind and narrows each area's themes to the
    /// deployable ones.
    pub fn plan(&self, spec: &SelectionSpec) -> Result<DeployPlan, SelectionError> {
        let areas = self.deployable(EntityKind::Area, &spec.areas)?;
        let locales = self.deployable(EntityKind::Locale, &spec.locales)?;
        let themes = self.deployable(EntityKind::Theme, &spec.themes)?;

        let mut area_themes = AreaThemeMap::new();
        let mut requested_themes: Vec<String> = Vec::new();

        for (area, area_universe) in self.universe.area_themes.iter() {
            if !areas.iter().any(|a| a == area) {
                continue;
            }
            for theme in area_universe.iter().filter(|t| themes.contains(*t)) {
                area_themes.insert(area, theme);
                if !requested_themes.contains(theme) {
                    requested_themes.push(theme.clone());
                }
            }
        }

        Ok(DeployPlan {
            locales,
            area_themes,
            requested_themes,
        })
    }
}
