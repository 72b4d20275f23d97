//! The host's generic sanitizer.
//!
//! Before persisting a block's saved data, the host reads the tool's
//! declarative sanitize descriptor and applies it field by field. A tool that
//! declares `AllowAll` for a field is trusted: its markup is stored
//! byte-identical. `Strip` removes tags through the engine's scanner.

use rawmark_engine::markup;
use rawmark_engine::{SanitizeConfig, SanitizeRule};
use serde_json::Value;

/// Applies a tool's sanitize descriptor to its saved data in place.
///
/// Only string fields named by the descriptor are touched; everything else
/// passes through. Non-object data is left alone.
pub fn apply(config: &SanitizeConfig, data: &mut Value) {
    let Some(object) = data.as_object_mut() else {
        return;
    };
    for (field, rule) in config.iter() {
        let Some(Value::String(text)) = object.get_mut(field) else {
            continue;
        };
        match rule {
            SanitizeRule::AllowAll => {}
            SanitizeRule::Strip => {
                let stripped = markup::strip_tags(text);
                if stripped != *text {
                    log::warn!("sanitizer stripped markup from field `{field}`");
                    *text = stripped;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn allow_all_is_byte_identity_on_hostile_markup() {
        let config = SanitizeConfig::new().allow_all("html");
        let hostile = "<script>steal()</script><img src=x onerror=alert(1)>";
        let mut data = json!({ "html": hostile });

        apply(&config, &mut data);
        assert_eq!(data["html"], hostile);
    }

    #[test]
    fn strip_removes_tags_keeps_text() {
        let config = SanitizeConfig::new().strip("caption");
        let mut data = json!({ "caption": "<b>bold</b> plain" });

        apply(&config, &mut data);
        assert_eq!(data["caption"], "bold plain");
    }

    #[test]
    fn fields_without_rules_are_untouched() {
        let config = SanitizeConfig::new().strip("caption");
        let mut data = json!({ "caption": "<i>x</i>", "html": "<i>y</i>" });

        apply(&config, &mut data);
        assert_eq!(data["html"], "<i>y</i>");
    }

    #[test]
    fn missing_and_non_string_fields_are_skipped() {
        let config = SanitizeConfig::new().strip("caption").strip("count");
        let mut data = json!({ "count": 3 });

        apply(&config, &mut data);
        assert_eq!(data, json!({ "count": 3 }));
    }

    #[test]
    fn non_object_data_is_left_alone() {
        let config = SanitizeConfig::new().strip("html");
        let mut data = json!("just a string");

        apply(&config, &mut data);
        assert_eq!(data, json!("just a string"));
    }
}
