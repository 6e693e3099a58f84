//! View configuration.
//!
//! Loaded from JSON or from `AMBASSADOR_*` environment variables; every field
//! has a default so an empty source is valid.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::format::{PhoneRegion, DEFAULT_DATE_FORMAT};
use crate::{Error, Result};

pub const ENV_DATE_FORMAT: &str = "AMBASSADOR_DATE_FORMAT";
pub const ENV_PHONE_REGION: &str = "AMBASSADOR_PHONE_REGION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// strftime pattern for `formatted_*_at` fields.
    pub date_format: String,
    /// Region assumed for phone numbers without a country code.
    pub phone_region: PhoneRegion,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            phone_region: PhoneRegion::default(),
        }
    }
}

impl ViewConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::Config(format!("invalid view config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by whichever `AMBASSADOR_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ViewConfig::from_env`] but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(pattern) = lookup(ENV_DATE_FORMAT) {
            config.date_format = pattern;
        }
        if let Some(region) = lookup(ENV_PHONE_REGION) {
            config.phone_region = region
                .parse()
                .map_err(|e: String| Error::Config(format!("{ENV_PHONE_REGION}: {e}")))?;
        }
        config.validate()?;
        tracing::debug!(date_format = %config.date_format, region = ?config.phone_region, "view config loaded");
        Ok(config)
    }

    /// Reject date patterns chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if self.date_format.is_empty() {
            return Err(Error::Config("date_format must not be empty".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!("invalid date_format `{}`", self.date_format)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.date_format, "%m/%d/%Y");
        assert_eq!(config.phone_region, PhoneRegion::Us);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ViewConfig::from_json(r#"{"date_format": "%Y-%m-%d"}"#).unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.phone_region, PhoneRegion::Us);

        let config = ViewConfig::from_json(r#"{"phone_region": "CA"}"#).unwrap();
        assert_eq!(config.phone_region, PhoneRegion::Ca);
    }

    #[test]
    fn test_from_json_rejects_bad_pattern() {
        assert!(matches!(ViewConfig::from_json(r#"{"date_format": "%Q"}"#), Err(Error::Config(_))));
        assert!(matches!(ViewConfig::from_json("not json"), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_lookup() {
        let config = ViewConfig::from_lookup(|key| match key {
            ENV_DATE_FORMAT => Some("%d.%m.%Y".to_string()),
            ENV_PHONE_REGION => Some("us".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.date_format, "%d.%m.%Y");

        let err = ViewConfig::from_lookup(|key| (key == ENV_PHONE_REGION).then(|| "FR".to_string()));
        assert!(matches!(err, Err(Error::Config(_))));
    }
}
