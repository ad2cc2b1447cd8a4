//! Rule Catalogue

pub mod headings;
pub mod media;
pub mod structure;
pub mod tables;

use super::engine::Rule;

pub use headings::{HeadingOrder, TitleMatchesH1};
pub use media::{FigcaptionPlacement, H5pResizer, IframeContainment, IframeTitle, ImageAlt};
pub use structure::{ContentBodyPlacement, DeprecatedMarkers, DoctypeLang, HeaderContentWrapper};
pub use tables::{TableDisplayClass, TableStructure};

/// The catalogue in reporting order
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DoctypeLang),
        Box::new(HeaderContentWrapper),
        Box::new(IframeContainment),
        Box::new(IframeTitle),
        Box::new(H5pResizer),
        Box::new(ContentBodyPlacement),
        Box::new(DeprecatedMarkers),
        Box::new(TableDisplayClass),
        Box::new(TableStructure),
        Box::new(TitleMatchesH1),
        Box::new(ImageAlt),
        Box::new(FigcaptionPlacement),
        Box::new(HeadingOrder),
    ]
}
