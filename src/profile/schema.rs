//! Profile Schema Types
//!
//! The rule constants and cleaning options, as loaded from TOML. Every field
//! has a default, so a profile file only needs to name what it changes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEPRECATED_MARKERS: &[&str] =
    &["main", "main-two-column", "sidebar", "video-container"];
pub const DEFAULT_CONTENT_CONTAINERS: &[&str] =
    &["content-wrapper", "second-column", "third-column"];
pub const DEFAULT_MEDIA_CONTAINER_CLASS: &str = "media-object";
pub const DEFAULT_VIDEO_HOSTS: &[&str] = &["youtube.com", "pima-cc.hosted.panopto.com"];
pub const DEFAULT_EMBED_TITLE: &str = "YouTube video player";
pub const DEFAULT_H5P_HOST_PREFIX: &str = "https://pima.h5p.com";
pub const DEFAULT_H5P_RESIZER_SRC: &str = "https://pima.h5p.com/js/h5p-resizer.js";
pub const DEFAULT_H5P_RESIZER_CHARSET: &str = "UTF-8";
pub const DEFAULT_TABLE_DISPLAY_CLASS: &str = "display-lg";

/// Text and flow elements, media carriers and block containers
pub const DEFAULT_PRUNABLE_TAGS: &[&str] = &[
    "span", "h1", "h2", "h3", "h4", "h5", "h6", "p", "strong", "em", "a", "iframe", "img", "div",
    "ul", "ol", "li",
];

/// Text and flow elements plus `iframe` only
pub const CONSERVATIVE_PRUNABLE_TAGS: &[&str] = &[
    "span", "h1", "h2", "h3", "h4", "h5", "h6", "p", "strong", "em", "a", "iframe",
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Complete profile (matches TOML)
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RuleProfile {
    pub profile: ProfileMeta,
    pub rules: RuleSettings,
    pub cleaning: CleaningSettings,
}

/// Profile metadata
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProfileMeta {
    pub name: String,
    pub description: Option<String>,
}

impl Default for ProfileMeta {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: None,
        }
    }
}

/// Constants consumed by the validation rules
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RuleSettings {
    /// Class or id names that are no longer allowed
    pub deprecated_markers: Vec<String>,
    /// Ids of the `div`s a `.content-body` may live under
    pub content_containers: Vec<String>,
    /// Exact `class` value of the `div` that must wrap hosted video iframes
    pub media_container_class: String,
    /// Substrings of iframe `src` values that mark hosted video
    pub video_hosts: Vec<String>,
    /// Default embed title that must be replaced by a descriptive one
    pub embed_default_title: String,
    pub h5p_host_prefix: String,
    pub h5p_resizer_src: String,
    pub h5p_resizer_charset: String,
    pub table_display_class: String,
    /// Rule names to skip, e.g. `heading-order`
    pub disabled_rules: Vec<String>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            deprecated_markers: owned(DEFAULT_DEPRECATED_MARKERS),
            content_containers: owned(DEFAULT_CONTENT_CONTAINERS),
            media_container_class: DEFAULT_MEDIA_CONTAINER_CLASS.to_string(),
            video_hosts: owned(DEFAULT_VIDEO_HOSTS),
            embed_default_title: DEFAULT_EMBED_TITLE.to_string(),
            h5p_host_prefix: DEFAULT_H5P_HOST_PREFIX.to_string(),
            h5p_resizer_src: DEFAULT_H5P_RESIZER_SRC.to_string(),
            h5p_resizer_charset: DEFAULT_H5P_RESIZER_CHARSET.to_string(),
            table_display_class: DEFAULT_TABLE_DISPLAY_CLASS.to_string(),
            disabled_rules: Vec::new(),
        }
    }
}

impl RuleSettings {
    pub fn is_disabled(&self, rule: &str) -> bool {
        self.disabled_rules.iter().any(|r| r.eq_ignore_ascii_case(rule))
    }
}

/// Options for the normalizer and pruner
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CleaningSettings {
    pub prunable_tags: Vec<String>,
    pub inject_table_display_class: bool,
}

impl Default for CleaningSettings {
    fn default() -> Self {
        Self {
            prunable_tags: owned(DEFAULT_PRUNABLE_TAGS),
            inject_table_display_class: true,
        }
    }
}

impl CleaningSettings {
    /// The text-only cleaning pass: no containers or images are pruned and
    /// tables are left alone
    pub fn conservative() -> Self {
        Self {
            prunable_tags: owned(CONSERVATIVE_PRUNABLE_TAGS),
            inject_table_display_class: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let profile: RuleProfile = toml::from_str(
            r#"
[profile]
name = "campus"

[rules]
video_hosts = ["vimeo.com"]
disabled_rules = ["heading-order"]
"#,
        )
        .unwrap();

        assert_eq!(profile.profile.name, "campus");
        assert_eq!(profile.rules.video_hosts, vec!["vimeo.com"]);
        assert_eq!(profile.rules.media_container_class, "media-object");
        assert!(profile.rules.is_disabled("Heading-Order"));
        assert_eq!(profile.cleaning, CleaningSettings::default());
    }

    #[test]
    fn test_empty_profile_is_default() {
        let profile: RuleProfile = toml::from_str("").unwrap();
        assert_eq!(profile, RuleProfile::default());
    }

    #[test]
    fn test_conservative_cleaning() {
        let cleaning = CleaningSettings::conservative();
        assert!(!cleaning.inject_table_display_class);
        assert!(!cleaning.prunable_tags.iter().any(|t| t == "div" || t == "img"));
    }
}
