//! Console configuration types
//!
//! The firmware embeds `console.toml` at build time. Its build script
//! deserializes the file into [`ConsoleConfig`], checks it with
//! [`ConsoleConfig::validate`] and bakes the result into a constant, so
//! nothing is parsed on the device.

use minicon_display::Rotation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::power::SleepDepth;

/// Shortest idle sleep interval
pub const MIN_REFRESH_MS: u32 = 10;

/// Longest idle sleep interval the wake timer can represent
pub const MAX_REFRESH_MS: u32 = 26_000;

/// Bring an idle interval into `MIN_REFRESH_MS..=MAX_REFRESH_MS`
pub fn clamp_refresh(interval_ms: u32) -> u32 {
    interval_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS)
}

/// What to do when the console cannot continue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FatalAction {
    /// Stop in place, leaving the debugger attached
    #[default]
    Halt,
    /// Reset the chip
    Reset,
}

/// LCD settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Operating voltage (0-127)
    pub contrast: u8,
    /// Bias system (0-7)
    pub bias: u8,
    /// Temperature coefficient (0-3)
    pub temperature_coefficient: u8,
    pub rotation: Rotation,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            contrast: 60,
            bias: 4,
            temperature_coefficient: 0,
            rotation: Rotation::Deg0,
        }
    }
}

/// Idle behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PowerConfig {
    /// How long to sleep when no events are pending
    pub refresh_ms: u32,
    pub sleep_depth: SleepDepth,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 1000,
            sleep_depth: SleepDepth::Light,
        }
    }
}

/// Complete console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsoleConfig {
    pub display: DisplayConfig,
    pub power: PowerConfig,
    pub on_fatal: FatalAction,
}

/// Configuration problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ContrastOutOfRange(u8),
    BiasOutOfRange(u8),
    TemperatureCoefficientOutOfRange(u8),
    RefreshOutOfRange(u32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ContrastOutOfRange(v) => {
                write!(f, "display.contrast = {} is out of range (0-127)", v)
            }
            ConfigError::BiasOutOfRange(v) => {
                write!(f, "display.bias = {} is out of range (0-7)", v)
            }
            ConfigError::TemperatureCoefficientOutOfRange(v) => {
                write!(f, "display.temperature_coefficient = {} is out of range (0-3)", v)
            }
            ConfigError::RefreshOutOfRange(v) => write!(
                f,
                "power.refresh_ms = {} is out of range ({}-{})",
                v, MIN_REFRESH_MS, MAX_REFRESH_MS
            ),
        }
    }
}

impl ConsoleConfig {
    /// Check every value is one the hardware accepts as-is
    ///
    /// Display values the driver would otherwise clamp are rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if display.contrast > minicon_display::pcd8544::MAX_CONTRAST {
            return Err(ConfigError::ContrastOutOfRange(display.contrast));
        }
        if display.bias > minicon_display::pcd8544::MAX_BIAS {
            return Err(ConfigError::BiasOutOfRange(display.bias));
        }
        if display.temperature_coefficient > minicon_display::pcd8544::MAX_TEMP_COEFFICIENT {
            return Err(ConfigError::TemperatureCoefficientOutOfRange(
                display.temperature_coefficient,
            ));
        }
        if !(MIN_REFRESH_MS..=MAX_REFRESH_MS).contains(&self.power.refresh_ms) {
            return Err(ConfigError::RefreshOutOfRange(self.power.refresh_ms));
        }
        Ok(())
    }
}
