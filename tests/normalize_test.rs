//! Normalization and pruning on realistic course pages
use html_audit::dom::node::{has_class, inner_html};
use html_audit::dom::{parse, Document};
use html_audit::normalize::{normalize_document, CleanOptions, FixedPointPruner};
use html_audit::profile::schema::DEFAULT_PRUNABLE_TAGS;

const EXPORTED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Week 3</title><script src="/theme.js"></script></head>
<body style="font-family: Arial">
  <div id="content-wrapper">
    <h1 style="color: #333">Week 3</h1>
    <p style="margin: 0" width="600">Read chapter three.</p>
    <p><span>&nbsp;</span></p>
    <p><iframe src="https://www.youtube.com/embed/xyz" title="Lecture"></iframe></p>
    <div><p><strong> </strong></p></div>
    <ul><li></li><li>Quiz</li></ul>
    <p><a href="notes.pdf" target="_self">Notes</a></p>
    <table cellpadding="4" width="100%" role="presentation"><tr><td style="border:0">1</td></tr></table>
    <script>trackPage()</script>
  </div>
</body>
</html>"#;

fn body_html(doc: &Document) -> String {
    doc.find_first("body").map(|b| inner_html(&b)).unwrap_or_default()
}

#[test]
fn test_exported_page_is_cleaned() {
    let doc = parse(EXPORTED_PAGE);
    let report = normalize_document(&doc, &CleanOptions::default());
    let html = doc.to_html();

    assert!(!html.contains("style="));
    assert!(!html.contains("width="));
    assert!(!html.contains("cellpadding"));
    assert!(!html.contains("target="));
    assert!(!html.contains("role="));
    assert!(!html.contains("trackPage"));
    assert!(html.contains(r#"<script src="/theme.js"></script>"#));
    assert!(html.contains(
        r#"<iframe src="https://www.youtube.com/embed/xyz" title="Lecture"></iframe>"#
    ));
    assert!(!html.contains("<p><iframe"));
    assert!(!html.contains("&nbsp;"));
    assert!(html.contains("<ul><li>Quiz</li></ul>"));

    let table = doc.find_first("table").unwrap();
    assert!(has_class(&table, "display-lg"));

    assert_eq!(report.attributes.scripts_removed, 1);
    assert_eq!(report.pruning.collapsed, 1);
    assert_eq!(report.pruning.removed, 3);
    assert!(!report.pruning.hit_pass_limit);
}

#[test]
fn test_normalize_reaches_a_fixed_point() {
    let doc = parse(EXPORTED_PAGE);
    normalize_document(&doc, &CleanOptions::default());
    let once = doc.to_html();

    let second = normalize_document(&doc, &CleanOptions::default());
    assert!(second.attributes.is_unchanged());
    assert!(!second.pruning.changed());
    assert_eq!(second.pruning.passes, 1);
    assert_eq!(doc.to_html(), once);

    // reparsing the output and cleaning again changes nothing either
    let reparsed = parse(&once);
    normalize_document(&reparsed, &CleanOptions::default());
    assert_eq!(reparsed.to_html(), once);
}

#[test]
fn test_conservative_keeps_containers() {
    let doc = parse(EXPORTED_PAGE);
    normalize_document(&doc, &CleanOptions::conservative());
    let html = doc.to_html();

    // the emptied div and list item survive, tables keep their class list
    assert!(html.contains("<div></div>"));
    assert!(html.contains("<li></li>"));
    let table = doc.find_first("table").unwrap();
    assert!(!has_class(&table, "display-lg"));
    assert!(!html.contains("trackPage"));
}

#[test]
fn test_deep_wrapper_chain_collapses_one_level_per_pass() {
    let mut html = String::from("<body>");
    for _ in 0..40 {
        html.push_str("<div>");
    }
    html.push_str(r#"<img src="a.png" alt="a">"#);
    for _ in 0..40 {
        html.push_str("</div>");
    }
    html.push_str("<p>end</p></body>");

    let doc = parse(&html);
    let report = FixedPointPruner::new(DEFAULT_PRUNABLE_TAGS.iter().copied()).prune(&doc);
    assert_eq!(body_html(&doc), r#"<img src="a.png" alt="a"><p>end</p>"#);
    assert_eq!(report.collapsed, 40);
    assert_eq!(report.passes, 41);
    assert!(!report.hit_pass_limit);
}

#[test]
fn test_image_wrapped_in_link_and_paragraph() {
    let doc =
        parse(r#"<body><p><a href="big.png"><img src="small.png" alt="thumb"></a></p></body>"#);
    let report = normalize_document(&doc, &CleanOptions::default());
    assert_eq!(body_html(&doc), r#"<img src="small.png" alt="thumb">"#);
    assert_eq!(report.pruning.collapsed, 2);
}

#[test]
fn test_empty_document() {
    let doc = parse("");
    let report = normalize_document(&doc, &CleanOptions::default());
    assert!(report.attributes.is_unchanged());
    assert!(!report.pruning.changed());
}
