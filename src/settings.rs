//! Configuration settings for a scrape run.
//!
//! The `Settings` struct controls which element kinds are serialized.
//! A fresh record is built per invocation by merging caller-supplied
//! overrides onto the defaults; it is read-only for the rest of the run.

use serde_json::Value;

/// Per-run extraction settings.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings, or [`Settings::merged`] to apply a flat map of
/// overrides the way the surrounding settings store delivers them.
///
/// # Example
///
/// ```rust
/// use markscrape::Settings;
///
/// let settings = Settings {
///     include_images: false,
///     ..Settings::default()
/// };
/// assert!(settings.include_tables);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Serialize `img` elements as Markdown image references.
    ///
    /// Default: `true`
    pub include_images: bool,

    /// Serialize `table` elements as pipe tables.
    ///
    /// Default: `true`
    pub include_tables: bool,

    /// Serialize `ul`/`ol` elements as Markdown lists.
    ///
    /// Default: `true`
    pub include_lists: bool,

    /// Serialize `pre` elements as fenced code blocks.
    ///
    /// Default: `true`
    pub include_code_blocks: bool,

    /// Reserved for the external download-conversion layer; recognized
    /// and merged but not consumed by the engine itself.
    ///
    /// Default: `false`
    pub custom_formatting: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_images: true,
            include_tables: true,
            include_lists: true,
            include_code_blocks: true,
            custom_formatting: false,
        }
    }
}

impl Settings {
    /// Build settings by merging a flat override map onto the defaults.
    ///
    /// Recognized keys are the wire names used by the settings store:
    /// `includeImages`, `includeTables`, `includeLists`,
    /// `includeCodeBlocks`, `customFormatting`. Unrecognized keys are
    /// ignored, as are values that are not booleans. Missing keys keep
    /// their defaults.
    #[must_use]
    pub fn merged(overrides: &serde_json::Map<String, Value>) -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(overrides);
        settings
    }

    /// Apply a flat override map in place. Same key handling as
    /// [`Settings::merged`].
    pub fn apply_overrides(&mut self, overrides: &serde_json::Map<String, Value>) {
        for (key, value) in overrides {
            let Some(flag) = value.as_bool() else { continue };
            match key.as_str() {
                "includeImages" => self.include_images = flag,
                "includeTables" => self.include_tables = flag,
                "includeLists" => self.include_lists = flag,
                "includeCodeBlocks" => self.include_code_blocks = flag,
                "customFormatting" => self.custom_formatting = flag,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => unreachable!("test override maps are objects"),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.include_images);
        assert!(settings.include_tables);
        assert!(settings.include_lists);
        assert!(settings.include_code_blocks);
        assert!(!settings.custom_formatting);
    }

    #[test]
    fn test_merge_overrides_known_keys() {
        let overrides = map(json!({
            "includeImages": false,
            "includeTables": false,
        }));
        let settings = Settings::merged(&overrides);
        assert!(!settings.include_images);
        assert!(!settings.include_tables);
        // Untouched keys keep defaults
        assert!(settings.include_lists);
        assert!(settings.include_code_blocks);
    }

    #[test]
    fn test_merge_ignores_unknown_keys() {
        let overrides = map(json!({
            "includeVideos": false,
            "theme": "dark",
        }));
        let settings = Settings::merged(&overrides);
        assert!(settings.include_images);
        assert!(settings.include_tables);
    }

    #[test]
    fn test_merge_ignores_non_boolean_values() {
        let overrides = map(json!({
            "includeImages": "false",
            "includeLists": 0,
        }));
        let settings = Settings::merged(&overrides);
        assert!(settings.include_images);
        assert!(settings.include_lists);
    }

    #[test]
    fn test_merge_custom_formatting() {
        let overrides = map(json!({ "customFormatting": true }));
        let settings = Settings::merged(&overrides);
        assert!(settings.custom_formatting);
    }
}
