//! The fixed contract between a block implementation and its host editor.
//!
//! The host drives every block through the same four entry points:
//! construction (inherent, since parameters differ per tool), [`BlockTool::render`],
//! [`BlockTool::save`], and the static capability descriptors. Nothing else
//! about a block is visible to the host.

use crate::view::NodeId;

/// Toolbox descriptor: how the host's tool palette presents this block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolboxEntry {
    /// Inline SVG icon markup.
    pub icon: &'static str,
    pub title: &'static str,
}

/// Per-field sanitization rule read by the host before storage or render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeRule {
    /// Leave the field untouched, trusting the author.
    AllowAll,
    /// Remove all tags, keeping text content.
    Strip,
}

/// Declarative field-to-rule mapping for a tool's saved data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeConfig {
    rules: Vec<(&'static str, SanitizeRule)>,
}

impl SanitizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_all(mut self, field: &'static str) -> Self {
        self.rules.push((field, SanitizeRule::AllowAll));
        self
    }

    pub fn strip(mut self, field: &'static str) -> Self {
        self.rules.push((field, SanitizeRule::Strip));
        self
    }

    pub fn rule_for(&self, field: &str) -> Option<SanitizeRule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| *rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, SanitizeRule)> + '_ {
        self.rules.iter().copied()
    }
}

/// Shared style class names the host hands to every block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClasses {
    pub block: String,
    pub input: String,
}

/// Handle onto the host editor: localized strings and shared styles.
pub trait HostApi {
    /// Localizes a UI string; unknown keys pass through unchanged.
    fn translate(&self, key: &str) -> String;

    fn styles(&self) -> StyleClasses;
}

/// Lifecycle operations the host invokes on a block implementation.
pub trait BlockTool {
    /// The persisted shape of this tool's data.
    type Data;

    /// Builds (or rebuilds) the tool's view and returns its root.
    fn render(&mut self) -> NodeId;

    /// Extracts current data from the view under `root`.
    fn save(&self, root: NodeId) -> Self::Data;

    fn is_read_only_supported() -> bool {
        false
    }

    fn display_in_toolbox() -> bool {
        false
    }

    /// Whether line breaks are allowed inside the tool's editing surface.
    fn enable_line_breaks() -> bool {
        false
    }

    fn toolbox() -> ToolboxEntry;

    fn sanitize() -> SanitizeConfig {
        SanitizeConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_lookup_by_field() {
        let config = SanitizeConfig::new().allow_all("html").strip("caption");

        assert_eq!(config.rule_for("html"), Some(SanitizeRule::AllowAll));
        assert_eq!(config.rule_for("caption"), Some(SanitizeRule::Strip));
        assert_eq!(config.rule_for("missing"), None);
    }

    #[test]
    fn default_config_has_no_rules() {
        let config = SanitizeConfig::default();
        assert_eq!(config.iter().count(), 0);
    }
}
