//! Page encoding options.
//!
//! These control the output width, optional crop and binarization. The
//! width itself is a device policy: callers pick it from the print head
//! they are driving, usually through [`DeviceClass`].

use std::fmt;
use std::str::FromStr;

use crate::{DEFAULT_DITHER_THRESHOLD, DEFAULT_THRESHOLD, NARROW_HEAD_WIDTH, WIDE_HEAD_WIDTH};

/// Print-head classes with a known dot width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// 384-dot heads (58mm paper).
    #[default]
    Narrow,
    /// 1664-dot heads.
    Wide,
}

impl DeviceClass {
    /// Map a numeric device selector to a class. `2` is wide; every other
    /// code falls back to narrow.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::Wide,
            _ => Self::Narrow,
        }
    }

    /// Printable width in dots.
    pub fn dot_width(self) -> u32 {
        match self {
            Self::Narrow => NARROW_HEAD_WIDTH,
            Self::Wide => WIDE_HEAD_WIDTH,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow => f.write_str("narrow"),
            Self::Wide => f.write_str("wide"),
        }
    }
}

impl FromStr for DeviceClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" | "1" => Ok(Self::Narrow),
            "wide" | "2" => Ok(Self::Wide),
            other => Err(format!("unknown device class '{other}'")),
        }
    }
}

/// Configuration for [`crate::PageEncoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Output width in dots.
    pub target_width: u32,

    /// Center-crop height; `0` (or anything `<= 10`) disables cropping.
    pub target_height: u32,

    /// Use Floyd-Steinberg dithering instead of a flat threshold.
    pub dither: bool,

    /// Flat-threshold cutoff: darker samples print.
    pub threshold: u8,

    /// Cutoff used by the dithering quantizer.
    pub dither_threshold: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            target_width: NARROW_HEAD_WIDTH,
            target_height: 0,
            dither: true,
            threshold: DEFAULT_THRESHOLD,
            dither_threshold: DEFAULT_DITHER_THRESHOLD,
        }
    }
}

impl EncodeOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the output width from a device class.
    pub fn with_device_class(mut self, class: DeviceClass) -> Self {
        self.target_width = class.dot_width();
        self
    }

    /// Builder: set the output width in dots.
    pub fn with_target_width(mut self, val: u32) -> Self {
        self.target_width = val;
        self
    }

    /// Builder: set the center-crop height.
    pub fn with_target_height(mut self, val: u32) -> Self {
        self.target_height = val;
        self
    }

    /// Builder: set dither flag.
    pub fn with_dither(mut self, val: bool) -> Self {
        self.dither = val;
        self
    }

    /// Builder: set the flat threshold.
    pub fn with_threshold(mut self, val: u8) -> Self {
        self.threshold = val;
        self
    }

    /// Builder: set the dithering threshold.
    pub fn with_dither_threshold(mut self, val: u8) -> Self {
        self.dither_threshold = val;
        self
    }
}
