//! Media Rules
//!
//! Embedded video iframes, H5P activities, images and figures.

use crate::dom::node::{
    attr, descendant_elements, find_ancestor, has_attr, is_tag, parent_element,
};
use crate::dom::{Document, NodeHandle};
use crate::profile::RuleSettings;
use crate::validation::engine::{Rule, ValidationResult};

pub const UNCONTAINED_IFRAMES: &str =
    "Invalid iframes detected (not contained within '.media-object')";
pub const DEFAULT_IFRAME_TITLE: &str = "Invalid iframes detected (incorrect title attribute)";
pub const MISSING_H5P_RESIZER: &str = "Invalid H5P activity (missing H5P resizer js)";
pub const MISSING_IMG_ALT: &str = "An <img> element is missing its alt attribute";
pub const LOOSE_FIGCAPTION: &str = "A figcaption is not nested within a figure element.";

/// Hosted-video iframes must sit inside `div.media-object`. Reported once per
/// file no matter how many iframes are affected.
pub struct IframeContainment;

impl IframeContainment {
    fn is_hosted_video(iframe: &NodeHandle, settings: &RuleSettings) -> bool {
        attr(iframe, "src")
            .map(|src| settings.video_hosts.iter().any(|host| src.contains(host.as_str())))
            .unwrap_or(false)
    }

    fn is_contained(iframe: &NodeHandle, settings: &RuleSettings) -> bool {
        find_ancestor(iframe, |ancestor| {
            is_tag(ancestor, "div")
                && attr(ancestor, "class").as_deref()
                    == Some(settings.media_container_class.as_str())
        })
        .is_some()
    }
}

impl Rule for IframeContainment {
    fn name(&self) -> &'static str {
        "iframe-containment"
    }

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult) {
        let uncontained = doc
            .elements_by_tag("iframe")
            .iter()
            .filter(|iframe| Self::is_hosted_video(iframe, settings))
            .any(|iframe| !Self::is_contained(iframe, settings));
        if uncontained {
            result.add(UNCONTAINED_IFRAMES);
        }
    }
}

/// Iframes still carrying the embed code's default title
pub struct IframeTitle;

impl Rule for IframeTitle {
    fn name(&self) -> &'static str {
        "iframe-title"
    }

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult) {
        let default_title = doc.elements_by_tag("iframe").iter().any(|iframe| {
            attr(iframe, "title")
                .map(|title| title.contains(settings.embed_default_title.as_str()))
                .unwrap_or(false)
        });
        if default_title {
            result.add(DEFAULT_IFRAME_TITLE);
        }
    }
}

/// Pages embedding H5P need the resizer script in `<head>`
pub struct H5pResizer;

impl H5pResizer {
    fn is_resizer(script: &NodeHandle, settings: &RuleSettings) -> bool {
        is_tag(script, "script")
            && attr(script, "src").as_deref() == Some(settings.h5p_resizer_src.as_str())
            && attr(script, "charset").as_deref()
                == Some(settings.h5p_resizer_charset.as_str())
            && has_attr(script, "defer")
    }
}

impl Rule for H5pResizer {
    fn name(&self) -> &'static str {
        "h5p-resizer"
    }

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult) {
        let embeds_h5p = doc.elements_by_tag("iframe").iter().any(|iframe| {
            attr(iframe, "src")
                .map(|src| src.starts_with(settings.h5p_host_prefix.as_str()))
                .unwrap_or(false)
        });
        if !embeds_h5p {
            return;
        }

        let has_resizer = doc
            .head()
            .map(|head| {
                descendant_elements(&head)
                    .iter()
                    .any(|script| Self::is_resizer(script, settings))
            })
            .unwrap_or(false);
        if !has_resizer {
            result.add(MISSING_H5P_RESIZER);
        }
    }
}

/// One finding per `img` without an `alt` attribute (an empty one is fine)
pub struct ImageAlt;

impl Rule for ImageAlt {
    fn name(&self) -> &'static str {
        "img-alt"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        for img in doc.elements_by_tag("img") {
            if !has_attr(&img, "alt") {
                result.add(MISSING_IMG_ALT);
            }
        }
    }
}

/// One finding per `figcaption` whose parent is not a `figure`
pub struct FigcaptionPlacement;

impl Rule for FigcaptionPlacement {
    fn name(&self) -> &'static str {
        "figcaption-parent"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        for figcaption in doc.elements_by_tag("figcaption") {
            let in_figure = parent_element(&figcaption)
                .map(|parent| is_tag(&parent, "figure"))
                .unwrap_or(false);
            if !in_figure {
                result.add(LOOSE_FIGCAPTION);
            }
        }
    }
}
