use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use html_audit::dom::parse;
use html_audit::profile::RuleSettings;
use html_audit::validation::RuleSet;

/// Generate a page body with `sections` repeated blocks of a given scenario
fn generate_page(sections: usize, scenario: &str) -> String {
    let mut body = String::new();

    for i in 0..sections {
        match scenario {
            "compliant" => body.push_str(&format!(
                "<h2>Section {i}</h2><p>Paragraph {i}.</p>\
                 <figure><img src=\"img{i}.png\" alt=\"Figure {i}\">\
                 <figcaption>Figure {i}</figcaption></figure>\
                 <table class=\"display-lg\"><thead><tr><th scope=\"col\">Week</th></tr></thead>\
                 <tbody><tr><td>{i}</td></tr></tbody></table>"
            )),
            "media_heavy" => body.push_str(&format!(
                "<h2>Video {i}</h2>\
                 <div class=\"media-object\">\
                 <iframe src=\"https://www.youtube.com/embed/{i}\" \
                 title=\"Lecture {i}\"></iframe></div>\
                 <p><iframe src=\"https://pima-cc.hosted.panopto.com/Panopto/Embed.aspx?id={i}\" \
                 title=\"YouTube video player\"></iframe></p>\
                 <img src=\"thumb{i}.png\">"
            )),
            "broken_tables" => body.push_str(&format!(
                "<h2>Table {i}</h2><table><tr><td>{i}</td></tr></table>\
                 <table><thead></thead><tbody><tr><td>{i}</td></tr></tbody></table>\
                 <figcaption>Loose {i}</figcaption>"
            )),
            "heading_soup" => body.push_str(&format!(
                "<h{}>Heading {i}</h{}>\
                 <div class=\"content-body\"><div class=\"content-body sidebar\">x</div></div>",
                1 + i % 6,
                1 + i % 6
            )),
            _ => body.push_str(&format!("<p>{i}</p>")),
        }
    }

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><title>Bench</title></head><body>\
         <header class=\"header\"></header><div id=\"content-wrapper\"><div class=\"content-body\">\
         <h1>Bench</h1>{body}</div></div></body></html>"
    )
}

fn bench_validation_scenarios(c: &mut Criterion) {
    let settings = RuleSettings::default();
    let rules = RuleSet::standard();

    let scenarios = vec![
        ("compliant", "No findings"),
        ("media_heavy", "Iframe and image findings"),
        ("broken_tables", "Table structure findings"),
        ("heading_soup", "Headings, nesting and deprecated markers"),
    ];

    let mut group = c.benchmark_group("validation_scenarios");

    for (scenario, _description) in scenarios {
        let doc = parse(&generate_page(200, scenario));

        group.throughput(Throughput::Elements(doc.element_count() as u64));
        group.bench_with_input(BenchmarkId::new("scenario", scenario), &doc, |b, doc| {
            b.iter(|| {
                let result = rules.validate("bench.html", black_box(doc), black_box(&settings));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_validation_scalability(c: &mut Criterion) {
    let settings = RuleSettings::default();
    let rules = RuleSet::standard();

    let mut group = c.benchmark_group("validation_scalability");

    for &sections in &[10, 100, 500, 2_000] {
        let html = generate_page(sections, "media_heavy");
        let doc = parse(&html);

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("sections", sections), &doc, |b, doc| {
            b.iter(|| {
                let result = rules.validate("bench.html", black_box(doc), black_box(&settings));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_parse_and_validate(c: &mut Criterion) {
    let settings = RuleSettings::default();
    let rules = RuleSet::standard();
    let html = generate_page(500, "compliant");

    let mut group = c.benchmark_group("parse_and_validate");
    group.throughput(Throughput::Bytes(html.len() as u64));

    group.bench_function("parse_only", |b| {
        b.iter(|| black_box(parse(black_box(&html))))
    });

    group.bench_function("parse_then_validate", |b| {
        b.iter(|| {
            let doc = parse(black_box(&html));
            black_box(rules.validate("bench.html", &doc, &settings))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_validation_scenarios,
    bench_validation_scalability,
    bench_parse_and_validate
);
criterion_main!(benches);
