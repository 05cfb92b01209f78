// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the search surface, loadable from TOML.
//!
//! Every section and field is optional; missing values take their defaults.
//!
//! ```toml
//! debounce_ms = 300
//!
//! [theme]
//! light_scroll_limit = 480.0
//!
//! [glow]
//! size = 160.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use sightline_filter::YearBounds;
use sightline_glow::GlowStyle;
use sightline_popup::PopupGeometry;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a typed query settles.
    pub debounce_ms: u64,
    /// Theme switching.
    pub theme: ThemeConfig,
    /// Filter popup placement.
    pub popup: PopupConfig,
    /// Pointer glow.
    pub glow: GlowConfig,
    /// Filter draft defaults.
    pub filter: FilterConfig,
}

/// Theme switching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Scroll offset below which the light theme may be used.
    pub light_scroll_limit: f64,
}

/// Filter popup placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Gap below the trigger.
    pub offset: f64,
    /// Inset from the viewport's right edge.
    pub right_inset: f64,
    /// Maximum panel width.
    pub max_width: f64,
    /// Share of the viewport width the panel may take.
    pub viewport_width_ratio: f64,
    /// Share of the viewport height the panel may take.
    pub viewport_height_ratio: f64,
}

/// Pointer glow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Gradient square edge.
    pub size: f64,
    /// Center opacity.
    pub gradient_opacity: f64,
    /// Gradient falloff, in percent of the radius.
    pub gradient_spread: f64,
}

/// Filter draft defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Lower year bound of a fresh draft.
    pub default_year_min: i32,
    /// Earliest selectable year.
    pub year_floor: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            theme: ThemeConfig::default(),
            popup: PopupConfig::default(),
            glow: GlowConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light_scroll_limit: 600.0,
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        let geometry = PopupGeometry::default();
        Self {
            offset: geometry.offset,
            right_inset: geometry.right_inset,
            max_width: geometry.max_width,
            viewport_width_ratio: geometry.viewport_width_ratio,
            viewport_height_ratio: geometry.viewport_height_ratio,
        }
    }
}

impl Default for GlowConfig {
    fn default() -> Self {
        let style = GlowStyle::default();
        Self {
            size: style.size,
            gradient_opacity: style.gradient_opacity,
            gradient_spread: style.gradient_spread,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_year_min: sightline_filter::DEFAULT_YEAR_MIN,
            year_floor: sightline_filter::YEAR_FLOOR,
        }
    }
}

impl PopupConfig {
    /// Placement parameters for [`sightline_popup::AnchoredPopup`].
    pub fn geometry(&self) -> PopupGeometry {
        PopupGeometry {
            offset: self.offset,
            right_inset: self.right_inset,
            max_width: self.max_width,
            viewport_width_ratio: self.viewport_width_ratio,
            viewport_height_ratio: self.viewport_height_ratio,
        }
    }
}

impl GlowConfig {
    /// Style for [`sightline_glow::PointerGlow`].
    pub fn style(&self) -> GlowStyle {
        GlowStyle {
            size: self.size,
            gradient_opacity: self.gradient_opacity,
            gradient_spread: self.gradient_spread,
        }
    }
}

impl FilterConfig {
    /// Year bounds for drafts created in `current_year`.
    pub fn year_bounds(&self, current_year: i32) -> YearBounds {
        YearBounds {
            floor: self.year_floor,
            current_year,
            default_min: self.default_year_min,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, falling back to defaults when the file is missing or unusable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no search config file; using defaults");
            return Self::default();
        }
        match Self::try_load_from(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded search config");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "search config unusable; using defaults");
                Self::default()
            }
        }
    }

    /// Reject values no host could lay out or clamp against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("theme.light_scroll_limit", self.theme.light_scroll_limit)?;
        non_negative("popup.offset", self.popup.offset)?;
        non_negative("popup.right_inset", self.popup.right_inset)?;
        non_negative("popup.max_width", self.popup.max_width)?;
        ratio("popup.viewport_width_ratio", self.popup.viewport_width_ratio)?;
        ratio("popup.viewport_height_ratio", self.popup.viewport_height_ratio)?;

        non_negative("glow.size", self.glow.size)?;
        if self.glow.size == 0.0 {
            return Err(invalid("glow.size", "must be greater than zero"));
        }
        ratio("glow.gradient_opacity", self.glow.gradient_opacity)?;
        if !(0.0..=100.0).contains(&self.glow.gradient_spread) {
            return Err(invalid(
                "glow.gradient_spread",
                format!("{} is not a percentage", self.glow.gradient_spread),
            ));
        }

        if self.filter.default_year_min < self.filter.year_floor {
            return Err(invalid(
                "filter.default_year_min",
                format!(
                    "{} is before the year floor {}",
                    self.filter.default_year_min, self.filter.year_floor
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not a finite, non-negative number")))
    }
}

fn ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is outside 0..=1")))
    }
}

/// Host preference flags, injected read-only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Disable continuous per-frame effects such as the pointer glow.
    pub low_performance_mode: bool,
    /// Whether the featured hero is shown, so `is_in_featured` can take effect.
    pub featured: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            low_performance_mode: false,
            featured: true,
        }
    }
}
