//! Drop-zone configuration.
//!
//! Built in code with the `with_*` methods or parsed from TOML:
//!
//! ```
//! use horizon_dropzone::{ContentType, DropZoneConfig};
//!
//! let config = DropZoneConfig::from_toml_str(r#"
//! allow_multiple = false
//! hint = "Drop a single image"
//! accepted_types = ["text/uri-list"]
//!
//! [style]
//! corner_radius = 12.0
//! "#).unwrap();
//!
//! assert!(!config.allow_multiple);
//! assert_eq!(config.accepted_types, vec![ContentType::FILE_URL]);
//! assert_eq!(config.style.corner_radius, 12.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::content_type::ContentType;
use crate::error::{DropZoneError, DropZoneResult};

/// Default hint shown inside an empty zone.
pub const DEFAULT_HINT: &str = "Drop files here.";

/// Behavior and appearance of a drop zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropZoneConfig {
    /// Whether more than one item may be dropped at once.
    pub allow_multiple: bool,
    /// Text shown inside the empty zone.
    pub hint: String,
    /// Content types requested from each dropped item.
    pub accepted_types: Vec<ContentType>,
    /// Border and text metrics.
    pub style: DropZoneStyle,
}

impl Default for DropZoneConfig {
    fn default() -> Self {
        Self {
            allow_multiple: true,
            hint: DEFAULT_HINT.to_string(),
            accepted_types: vec![ContentType::FILE_URL],
            style: DropZoneStyle::default(),
        }
    }
}

impl DropZoneConfig {
    /// Parse and validate a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> DropZoneResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> DropZoneResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check that the configuration can drive a drop zone.
    pub fn validate(&self) -> DropZoneResult<()> {
        if self.accepted_types.is_empty() {
            return Err(DropZoneError::InvalidConfig(
                "accepted_types must not be empty".to_string(),
            ));
        }
        if let Some(ty) = self.accepted_types.iter().find(|ty| ty.as_str().trim().is_empty()) {
            return Err(DropZoneError::InvalidConfig(format!(
                "accepted type {:?} is blank",
                ty.as_str()
            )));
        }
        self.style.validate()
    }

    pub fn with_allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_accepted_types(mut self, types: impl IntoIterator<Item = ContentType>) -> Self {
        self.accepted_types = types.into_iter().collect();
        self
    }

    pub fn with_style(mut self, style: DropZoneStyle) -> Self {
        self.style = style;
        self
    }
}

/// Metrics used when painting the zone, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropZoneStyle {
    /// Inset of the dashed border from the widget bounds.
    pub padding: f32,
    pub border_width: f32,
    pub corner_radius: f32,
    pub dash_length: f32,
    pub gap_length: f32,
    pub font_size: f32,
}

impl Default for DropZoneStyle {
    fn default() -> Self {
        Self {
            padding: 8.0,
            border_width: 2.0,
            corner_radius: 8.0,
            dash_length: 6.0,
            gap_length: 4.0,
            font_size: 14.0,
        }
    }
}

impl DropZoneStyle {
    fn validate(&self) -> DropZoneResult<()> {
        let metrics = [
            ("padding", self.padding),
            ("border_width", self.border_width),
            ("corner_radius", self.corner_radius),
            ("dash_length", self.dash_length),
            ("gap_length", self.gap_length),
        ];
        for (name, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(DropZoneError::InvalidConfig(format!(
                    "style.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(DropZoneError::InvalidConfig(format!(
                "style.font_size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DropZoneConfig::from_toml_str("").unwrap();
        assert_eq!(config, DropZoneConfig::default());
        assert!(config.allow_multiple);
        assert_eq!(config.hint, DEFAULT_HINT);
    }

    #[test]
    fn test_rejects_empty_accepted_types() {
        let err = DropZoneConfig::from_toml_str("accepted_types = []").unwrap_err();
        assert!(matches!(err, DropZoneError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = DropZoneConfig::from_toml_str("allow_many = true").unwrap_err();
        assert!(matches!(err, DropZoneError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_negative_metrics() {
        let config = DropZoneConfig::default().with_style(DropZoneStyle {
            border_width: -1.0,
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let config = DropZoneConfig::default()
            .with_allow_multiple(false)
            .with_hint("Drop a PDF")
            .with_accepted_types([ContentType::FILE_URL, ContentType::new("application/pdf")]);
        let text = config.to_toml_string().unwrap();
        assert_eq!(DropZoneConfig::from_toml_str(&text).unwrap(), config);
    }
}
