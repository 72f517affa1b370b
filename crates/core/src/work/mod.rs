//! Work units and their enumeration.
//!
//! A work unit is one independent (area, theme, locale) deployment job.
//! Enumeration is the full cross product of the deploy plan, in a fixed
//! order: areas in map order, then each area's themes, then locales.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::AreaThemeMap;
use crate::selection::DeployPlan;

/// One indivisible deployment job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkUnit {
    pub area: String,
    pub theme: String,
    pub locale: String,
}

impl WorkUnit {
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

impl fmt::Display for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.area, self.theme, self.locale)
    }
}

/// Expands `area_themes` × `locales` into work units.
pub fn enumerate(area_themes: &AreaThemeMap, locales: &[String]) -> Vec<WorkUnit> {
    let mut units = Vec::new();
    for (area, themes) in area_themes.iter() {
        for theme in themes {
            for locale in locales {
                units.push(WorkUnit::new(area, theme.as_str(), locale.as_str()));
            }
        }
    }
    units
}

impl DeployPlan {
    /// Work units for this plan, in enumeration order.
    pub fn work_units(&self) -> Vec<WorkUnit> {
        enumerate(&self.area_themes, &self.locales)
    }
}
