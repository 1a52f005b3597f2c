//! Console configuration baked in from console.toml

use minicon_core::config::{ConsoleConfig, DisplayConfig, FatalAction, PowerConfig};
use minicon_core::SleepDepth;
use minicon_display::Rotation;

include!(concat!(env!("OUT_DIR"), "/console_config.rs"));
