//! Configuration for the verify/redact pipeline.

use serde::{Deserialize, Serialize};
use std::env;

/// Default margin added around an image before OCR, in pixels.
const DEFAULT_PADDING_WIDTH: u32 = 25;

/// Tunables for verification and redaction runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Margin added on all four sides before OCR, in pixels.
    ///
    /// OCR engines lose accuracy on text flush against the image edge;
    /// the margin is a deliberate preprocessing step, not cosmetic. The
    /// offset is subtracted back out of every reported coordinate.
    pub padding_width: u32,

    /// Optional language hint forwarded to the analyzer
    pub language: Option<String>,

    /// RGB fill color used by destructive redaction
    pub fill: [u8; 3],
}

impl VerifyConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `PIISCAN_PADDING`: padding width in pixels (default: 25)
    /// - `PIISCAN_LANGUAGE`: analyzer language hint (default: unset)
    #[must_use = "creates config from environment variables"]
    pub fn from_env() -> Self {
        let padding_width = env::var("PIISCAN_PADDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PADDING_WIDTH);

        let language = env::var("PIISCAN_LANGUAGE").ok();

        Self {
            padding_width,
            language,
            ..Self::default()
        }
    }
}

impl Default for VerifyConfig {
    #[inline]
    fn default() -> Self {
        Self {
            padding_width: DEFAULT_PADDING_WIDTH,
            language: None,
            fill: [0, 0, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifyConfig::default();
        assert_eq!(config.padding_width, 25);
        assert_eq!(config.language, None);
        assert_eq!(config.fill, [0, 0, 0]);
    }
}
