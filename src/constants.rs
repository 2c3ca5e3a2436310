//! Application-wide constants
//!
//! Storage names, surface geometry and control ranges live here so the
//! store, persistence and GUI layers agree on a single set of values.

/// Filesystem layout
pub mod paths {
    /// Directory name under the platform config/data dirs
    pub const APP_DIR: &str = "gradient-fader";

    /// Config file name inside the config dir
    pub const CONFIG_FILENAME: &str = "config.json";

    /// Extension appended to key-value record names on disk
    pub const RECORD_EXTENSION: &str = "json";
}

/// Persisted record naming
pub mod storage {
    /// Key of the single record holding the saved shader inputs
    pub const RECORD_KEY: &str = "shaderInputs";
}

/// Preview surface geometry
pub mod surface {
    pub const WIDTH: u32 = 300;
    pub const HEIGHT: u32 = 300;
}

/// Slider ranges for the control panel
pub mod ranges {
    use std::ops::RangeInclusive;

    /// X and Y coefficients
    pub const AXIS: RangeInclusive<f32> = -3.0..=3.0;

    pub const SATURATION: RangeInclusive<f32> = 0.0..=1.0;

    /// Global opacity
    pub const ALPHA: RangeInclusive<f32> = 0.7..=1.0;
}
