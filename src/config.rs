//! Timing and behavior configuration.
//!
//! Every field has a default matching the site's stock behavior, so a config
//! file only needs the values it changes:
//!
//! ```toml
//! variant = "static"
//!
//! [carousel]
//! interval_ms = 6000
//!
//! [calendar]
//! default_key = "november"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Which load behavior a page gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    /// Home page: run the intro timeline when its particle container exists.
    #[default]
    Index,
    /// Other pages: show header, nav and hero in their final state at once.
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: CAROUSEL_INTERVAL_MS }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Month shown (and its button marked active) before any click.
    pub default_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub particle_count: usize,
    pub stream_ms: u64,
    pub particle_lifetime_ms: u64,
    pub logo_reveal_ms: u64,
    pub logo_relocate_ms: u64,
    pub nav_link_delay_ms: u64,
    pub nav_link_stagger_ms: u64,
    /// Fixed seed for particle randomness; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            stream_ms: PARTICLE_STREAM_MS,
            particle_lifetime_ms: PARTICLE_LIFETIME_MS,
            logo_reveal_ms: LOGO_REVEAL_MS,
            logo_relocate_ms: LOGO_RELOCATE_MS,
            nav_link_delay_ms: NAV_LINK_DELAY_MS,
            nav_link_stagger_ms: NAV_LINK_STAGGER_MS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f32,
    pub trophy_duration_ms: u64,
    pub trophy_stagger_ms: u64,
    pub text_lead_ms: u64,
    pub text_stagger_ms: u64,
    pub text_duration_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            trophy_duration_ms: TROPHY_DURATION_MS,
            trophy_stagger_ms: TROPHY_STAGGER_MS,
            text_lead_ms: TROPHY_TEXT_LEAD_MS,
            text_stagger_ms: TROPHY_TEXT_STAGGER_MS,
            text_duration_ms: TROPHY_TEXT_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: PageVariant,
    pub carousel: CarouselConfig,
    pub calendar: CalendarConfig,
    pub intro: IntroConfig,
    pub reveal: RevealConfig,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.carousel.interval_ms == 0 {
            bail!("carousel.interval_ms must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            bail!("reveal.threshold must be between 0 and 1, got {}", self.reveal.threshold);
        }
        if self.intro.logo_relocate_ms < self.intro.logo_reveal_ms {
            bail!("intro.logo_relocate_ms must not come before intro.logo_reveal_ms");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_stock_timings() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.variant, PageVariant::Index);
        assert_eq!(config.carousel.interval_ms, 4000);
        assert_eq!(config.intro.particle_count, 30);
        assert_eq!(config.intro.logo_relocate_ms, 4500);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.calendar.default_key, None);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            variant = "static"

            [calendar]
            default_key = "november"

            [intro]
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.variant, PageVariant::Static);
        assert_eq!(config.calendar.default_key.as_deref(), Some("november"));
        assert_eq!(config.intro.seed, Some(7));
        assert_eq!(config.intro.stream_ms, 1500);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Config::from_toml_str("[carousel]\ninterval_ms = 0").is_err());
        assert!(Config::from_toml_str("[reveal]\nthreshold = 1.5").is_err());
        assert!(Config::from_toml_str("variant = \"landing\"").is_err());
    }
}
