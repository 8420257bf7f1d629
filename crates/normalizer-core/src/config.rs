use chrono_tz::Tz;

use crate::errors::{NormalizeError, Result};

pub const DEFAULT_SOURCE_TZ: &str = "America/Los_Angeles";
pub const DEFAULT_TARGET_TZ: &str = "America/New_York";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Zone the raw `Timestamp` wall-clock values were recorded in.
    pub source_tz: Tz,
    /// Zone the rewritten RFC3339 values are expressed in.
    pub target_tz: Tz,
}

impl PipelineConfig {
    pub fn from_names(source: &str, target: &str) -> Result<Self> {
        Ok(Self {
            source_tz: parse_timezone(source)?,
            target_tz: parse_timezone(target)?,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_tz: chrono_tz::America::Los_Angeles,
            target_tz: chrono_tz::America::New_York,
        }
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim().parse::<Tz>().map_err(|err| NormalizeError::Timezone {
        name: name.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_match_default_config() {
        let parsed = PipelineConfig::from_names(DEFAULT_SOURCE_TZ, DEFAULT_TARGET_TZ)
            .expect("default zones should parse");
        assert_eq!(parsed, PipelineConfig::default());
    }

    #[test]
    fn unknown_zone_is_fatal() {
        let err = PipelineConfig::from_names("America/Nowhere", DEFAULT_TARGET_TZ)
            .expect_err("bogus zone should fail");
        assert!(
            matches!(err, NormalizeError::Timezone { ref name, .. } if name == "America/Nowhere")
        );
    }
}
