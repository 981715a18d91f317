//! Page configuration embedded in the document
//!
//! The page may carry a `<script id="folio-config" type="application/json">`
//! element. Every field is optional; anything absent or invalid falls back
//! to defaults.

use folio_backdrop::{BackdropSettings, ConfigError};
use folio_page::CardVariant;
use serde::Deserialize;

/// Id of the embedded configuration element
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Everything the page can be configured with
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub card_variant: CardVariant,
    pub backdrop: BackdropSettings,
}

impl SiteConfig {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.backdrop.validate()?;
        Ok(config)
    }

    /// Parse the embedded element's text, logging and defaulting on failure
    pub fn from_embedded(text: Option<&str>) -> Self {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => {
                log::info!("[page] no embedded config, using defaults");
                Self::default()
            }
            Some(json) => Self::from_json(json).unwrap_or_else(|err| {
                log::warn!("[page] invalid embedded config ({}), using defaults", err);
                Self::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_defaults() {
        assert_eq!(SiteConfig::from_embedded(None), SiteConfig::default());
        assert_eq!(SiteConfig::from_embedded(Some("  \n")), SiteConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config =
            SiteConfig::from_json(r#"{"cardVariant":"compact","backdrop":{"heroOnly":false}}"#)
                .unwrap();
        assert_eq!(config.card_variant, CardVariant::Compact);
        assert!(!config.backdrop.hero_only);
        assert_eq!(config.backdrop.query_param, "bg");
    }

    #[test]
    fn test_invalid_backdrop_rejected() {
        let err = SiteConfig::from_json(r#"{"backdrop":{"offscreenDamp":4.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::DampOutOfRange(_)));
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let config = SiteConfig::from_embedded(Some(r#"{"cardVariant":"poster"}"#));
        assert_eq!(config, SiteConfig::default());

        let config = SiteConfig::from_embedded(Some("not json"));
        assert_eq!(config, SiteConfig::default());
    }
}
