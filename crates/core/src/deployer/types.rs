//! Types for the deployer module.

use serde::{Deserialize, Serialize};

use crate::catalog::AreaThemeMap;
use crate::work::{enumerate, WorkUnit};

/// Status reported by a fully successful deployment.
pub const STATUS_SUCCESS: i32 = 0;

/// Generic failure status.
pub const STATUS_FAILURE: i32 = 1;

/// Content-kind switches forwarded to the deployer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployOptions {
    #[serde(default)]
    pub no_javascript: bool,
    #[serde(default)]
    pub no_css: bool,
    #[serde(default)]
    pub no_less: bool,
    #[serde(default)]
    pub no_images: bool,
    #[serde(default)]
    pub no_fonts: bool,
    #[serde(default)]
    pub no_html: bool,
    #[serde(default)]
    pub no_misc: bool,
    #[serde(default)]
    pub no_html_minify: bool,
}

impl DeployOptions {
    /// Command-line flags for every enabled switch.
    pub fn to_args(&self) -> Vec<&'static str> {
        [
            (self.no_javascript, "--no-javascript"),
            (self.no_css, "--no-css"),
            (self.no_less, "--no-less"),
            (self.no_images, "--no-images"),
            (self.no_fonts, "--no-fonts"),
            (self.no_html, "--no-html"),
            (self.no_misc, "--no-misc"),
            (self.no_html_minify, "--no-html-minify"),
        ]
        .into_iter()
        .filter_map(|(enabled, flag)| enabled.then_some(flag))
        .collect()
    }
}

/// What a deployer is asked to deploy: a set of locales for a set of
/// area themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRequest {
    pub locales: Vec<String>,
    pub area_themes: AreaThemeMap,
    #[serde(default)]
    pub options: DeployOptions,
}

impl DeployRequest {
    /// Request covering exactly one work unit.
    pub fn for_unit(unit: &WorkUnit, options: &DeployOptions) -> Self {
        let mut area_themes = AreaThemeMap::new();
        area_themes.insert(&unit.area, &unit.theme);
        Self {
            locales: vec![unit.locale.clone()],
            area_themes,
            options: options.clone(),
        }
    }

    /// Work units covered by this request.
    pub fn units(&self) -> Vec<WorkUnit> {
        enumerate(&self.area_themes, &self.locales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_to_args() {
        let options = DeployOptions {
            no_css: true,
            no_html_minify: true,
            ..Default::default()
        };
        assert_eq!(options.to_args(), vec!["--no-css", "--no-html-minify"]);
        assert!(DeployOptions::default().to_args().is_empty());
    }

    #[test]
    fn test_request_for_unit_round_trips_unit() {
        let unit = WorkUnit::new("frontend", "Magento/luma", "fr_FR");
        let request = DeployRequest::for_unit(&unit, &DeployOptions::default());

        assert_eq!(request.locales, vec!["fr_FR"]);
        assert_eq!(request.units(), vec![unit]);
    }
}
