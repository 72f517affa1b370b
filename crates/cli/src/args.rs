//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use static_deploy_core::{Config, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "static-deploy")]
#[command(about = "Deploys static view files")]
#[command(version)]
pub struct Cli {
    /// Languages to deploy (replaces --language when given)
    pub languages: Vec<String>,

    /// Configuration file [default: static-deploy.toml]
    #[arg(short, long, env = "STATIC_DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog of discovered (area, theme, locale) entries
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// If specified, then no files will be actually deployed
    #[arg(short, long)]
    pub dry_run: bool,

    /// If specified, then files will be deployed in any mode
    #[arg(short, long)]
    pub force: bool,

    /// Amount of jobs to which the deployment can be paralleled
    #[arg(short, long, allow_negative_numbers = true)]
    pub jobs: Option<i64>,

    /// Areas to deploy [default: all]
    #[arg(short, long)]
    pub area: Vec<String>,

    /// Areas not to deploy [default: none]
    #[arg(long)]
    pub exclude_area: Vec<String>,

    /// Themes to deploy [default: all]
    #[arg(short, long)]
    pub theme: Vec<String>,

    /// Themes not to deploy [default: none]
    #[arg(long)]
    pub exclude_theme: Vec<String>,

    /// Languages to deploy [default: all]
    #[arg(short, long)]
    pub language: Vec<String>,

    /// Languages not to deploy [default: none]
    #[arg(long)]
    pub exclude_language: Vec<String>,

    /// If specified, no JavaScript will be deployed
    #[arg(long)]
    pub no_javascript: bool,

    /// If specified, no CSS will be deployed
    #[arg(long)]
    pub no_css: bool,

    /// If specified, no LESS will be deployed
    #[arg(long)]
    pub no_less: bool,

    /// If specified, no images will be deployed
    #[arg(long)]
    pub no_images: bool,

    /// If specified, no font files will be deployed
    #[arg(long)]
    pub no_fonts: bool,

    /// If specified, no html files will be deployed
    #[arg(long)]
    pub no_html: bool,

    /// If specified, no miscellaneous files will be deployed
    #[arg(long)]
    pub no_misc: bool,

    /// If specified, html will not be minified
    #[arg(long)]
    pub no_html_minify: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Write Prometheus metrics to this file when the run ends
    #[arg(long)]
    pub metrics_file: Option<PathBuf>,
}

impl Cli {
    /// Overrides configuration values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref path) = self.catalog {
            config.catalog.path = path.clone();
        }
        if let Some(jobs) = self.jobs {
            config.deploy.jobs = jobs;
        }
        config.deploy.dry_run |= self.dry_run;
        config.deploy.force |= self.force;

        let languages = if self.languages.is_empty() {
            &self.language
        } else {
            &self.languages
        };
        override_selection(&mut config.selection.areas, &self.area, &self.exclude_area);
        override_selection(&mut config.selection.themes, &self.theme, &self.exclude_theme);
        override_selection(&mut config.selection.locales, languages, &self.exclude_language);

        let options = &mut config.options;
        options.no_javascript |= self.no_javascript;
        options.no_css |= self.no_css;
        options.no_less |= self.no_less;
        options.no_images |= self.no_images;
        options.no_fonts |= self.no_fonts;
        options.no_html |= self.no_html;
        options.no_misc |= self.no_misc;
        options.no_html_minify |= self.no_html_minify;
    }
}

fn override_selection(selection: &mut Selection, include: &[String], exclude: &[String]) {
    if !include.is_empty() {
        selection.include = include.to_vec();
    }
    if !exclude.is_empty() {
        selection.exclude = exclude.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use static_deploy_core::DeployOptions;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("static-deploy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let mut config = Config::default();
        parse(&[]).apply(&mut config);

        assert_eq!(config.deploy.jobs, 4);
        assert!(config.selection.areas.includes_all());
        assert!(config.selection.locales.excludes_none());
        assert_eq!(config.options, DeployOptions::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        parse(&[
            "-j", "2", "-a", "frontend", "--exclude-theme", "Magento/blank", "-f", "--no-css",
        ])
        .apply(&mut config);

        assert_eq!(config.deploy.jobs, 2);
        assert!(config.deploy.force);
        assert_eq!(config.selection.areas.include, vec!["frontend"]);
        assert_eq!(config.selection.themes.exclude, vec!["Magento/blank"]);
        assert!(config.options.no_css);
    }

    #[test]
    fn test_positional_languages_replace_language_option() {
        let mut config = Config::default();
        parse(&["-l", "de_DE", "fr_FR", "nl_NL"]).apply(&mut config);

        assert_eq!(config.selection.locales.include, vec!["fr_FR", "nl_NL"]);
    }

    #[test]
    fn test_negative_jobs_parsed_for_validation() {
        let cli = parse(&["--jobs", "-3"]);
        assert_eq!(cli.jobs, Some(-3));
    }
}
