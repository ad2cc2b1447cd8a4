use html_audit::pipeline::Pipeline;
use html_audit::profile::embedded_profile;

fn main() {
    println!("=== HTML Audit Demo ===");

    let pages = [
        (
            "compliant.html",
            r#"<!DOCTYPE html><html lang="en"><head><title>Intro</title></head><body>
<header class="header"></header>
<div id="content-wrapper"><div class="content-body"><h1>Intro</h1><p>Welcome.</p></div></div>
</body></html>"#,
        ),
        (
            "legacy.html",
            r#"<html><head><title>Week 2</title></head><body style="margin:0">
<div class="main"><h1>Week 2</h1><h3>Skipped a level</h3>
<p><span>&nbsp;</span></p>
<p><iframe src="https://www.youtube.com/embed/abc" title="YouTube video player"></iframe></p>
<table width="100%"><tr><td>1</td></tr></table>
<img src="chart.png"></div>
</body></html>"#,
        ),
    ];

    let pipeline = Pipeline::new(&embedded_profile());

    for (path, html) in pages {
        let processed = pipeline.process_source(path, html);
        println!("\nFile: {}", path);
        println!("Changes: {:?}", processed.report);
        if processed.messages.is_empty() {
            println!("No findings");
        }
        for message in &processed.messages {
            println!(" > {}", message);
        }
        println!("Output: {}", processed.html);
    }
}
