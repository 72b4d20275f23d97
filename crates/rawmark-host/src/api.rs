use std::collections::BTreeMap;

use rawmark_engine::{HostApi, StyleClasses};

/// Style class names shared by every block the editor hosts.
const BLOCK_CLASS: &str = "cdx-block";
const INPUT_CLASS: &str = "cdx-input";

/// The host editor handle passed to blocks at construction: localized UI
/// strings and shared style classes.
#[derive(Debug, Clone, Default)]
pub struct EditorApi {
    translations: BTreeMap<String, String>,
}

impl EditorApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// An API whose `translate` resolves through the given table; unknown
    /// keys pass through unchanged.
    pub fn with_translations(translations: BTreeMap<String, String>) -> Self {
        Self { translations }
    }
}

impl HostApi for EditorApi {
    fn translate(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn styles(&self) -> StyleClasses {
        StyleClasses {
            block: BLOCK_CLASS.to_string(),
            input: INPUT_CLASS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_pass_through() {
        let api = EditorApi::new();
        assert_eq!(api.translate("Enter HTML code"), "Enter HTML code");
    }

    #[test]
    fn translation_table_is_honored() {
        let mut table = BTreeMap::new();
        table.insert(
            "Enter HTML code".to_string(),
            "HTML-Code eingeben".to_string(),
        );
        let api = EditorApi::with_translations(table);

        assert_eq!(api.translate("Enter HTML code"), "HTML-Code eingeben");
        assert_eq!(api.translate("Switch to render mode"), "Switch to render mode");
    }

    #[test]
    fn style_classes_are_the_shared_editor_set() {
        let styles = EditorApi::new().styles();
        assert_eq!(styles.block, "cdx-block");
        assert_eq!(styles.input, "cdx-input");
    }
}
