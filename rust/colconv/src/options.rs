//! Conversion options.

use colconv_common::{Result, verify_arg};
use serde::{Deserialize, Serialize};

/// Interpretation rules for the `DECIMAL` and `DATE` converted types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// `DECIMAL` is `unscaled × 10^(−scale)`; `DATE` counts days from 1970-01-01.
    #[default]
    Standard,
    /// Matches files decoded by older readers: `DECIMAL` is scaled by
    /// `10^(1 − scale)` and `DATE` is a proleptic Gregorian ordinal where
    /// 0001-01-01 is day 1.
    Legacy,
}

/// Options controlling how a column is converted.
///
/// All fields have defaults, so a partial configuration document deserializes
/// into a complete set of options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub compatibility: Compatibility,
    /// Reject `FIXED_LEN_BYTE_ARRAY` decimals whose length differs from the
    /// declared type length.
    pub strict_fixed_length: bool,
    /// Minimum column length for which `convert_column_par` fans out to the
    /// rayon pool.
    pub parallel_threshold: usize,
    /// Maximum nesting of BSON documents and arrays.
    pub bson_max_depth: usize,
}

impl ConversionOptions {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

    pub fn new() -> ConversionOptions {
        Default::default()
    }

    /// Options reproducing the legacy `DECIMAL` and `DATE` interpretation.
    pub fn legacy() -> ConversionOptions {
        ConversionOptions::new().with_compatibility(Compatibility::Legacy)
    }

    pub fn with_compatibility(self, compatibility: Compatibility) -> Self {
        Self {
            compatibility,
            ..self
        }
    }

    pub fn with_strict_fixed_length(self, strict_fixed_length: bool) -> Self {
        Self {
            strict_fixed_length,
            ..self
        }
    }

    pub fn with_parallel_threshold(self, parallel_threshold: usize) -> Self {
        Self {
            parallel_threshold,
            ..self
        }
    }

    /// Sets the BSON nesting limit. Zero is rejected by [`Self::validate`].
    pub fn with_bson_max_depth(self, bson_max_depth: usize) -> Self {
        Self {
            bson_max_depth,
            ..self
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.compatibility == Compatibility::Legacy
    }

    /// Checks the option values, whether set through the builder or loaded
    /// from a configuration document.
    ///
    /// # Errors
    /// `InvalidArgument` if `bson_max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(bson_max_depth, self.bson_max_depth > 0);
        Ok(())
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            compatibility: Compatibility::Standard,
            strict_fixed_length: true,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
            bson_max_depth: colconv_value_conversions::bson_conversions::DEFAULT_MAX_DEPTH,
        }
    }
}
