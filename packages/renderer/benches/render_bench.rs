use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{BlockRegistry, Document, Template};
use pagecraft_renderer::{render_page, to_html, HtmlOptions, Renderer};

fn render_landing_template(c: &mut Criterion) {
    let doc = Template::Landing.build(BlockRegistry::builtin(), "bench/home").unwrap();
    let renderer = Renderer::new(BlockRegistry::builtin());

    c.bench_function("render_landing_template", |b| {
        b.iter(|| renderer.render(black_box(&doc)))
    });
}

/// Twenty sections, each a row of two columns with text and a button
fn large_document() -> Document {
    let mut doc = Document::new();
    let root = doc.root_id().clone();

    for _ in 0..20 {
        let row = doc.add_node(&root, "Container", None, None).unwrap();
        for _ in 0..2 {
            let column = doc.add_node(&row, "Column", None, None).unwrap();
            doc.add_node(&column, "Text", None, None).unwrap();
            doc.add_node(&column, "Button", None, None).unwrap();
        }
    }
    doc
}

fn render_large_document(c: &mut Criterion) {
    let doc = large_document();
    let renderer = Renderer::new(BlockRegistry::builtin());

    c.bench_function("render_large_document", |b| {
        b.iter(|| renderer.render(black_box(&doc)))
    });
}

fn html_large_document(c: &mut Criterion) {
    let doc = large_document();
    let output = Renderer::new(BlockRegistry::builtin()).render(&doc).unwrap();
    let options = HtmlOptions::default();

    c.bench_function("html_large_document", |b| {
        b.iter(|| to_html(black_box(&output.root), &options))
    });
}

fn full_page_large_document(c: &mut Criterion) {
    let doc = large_document();
    let options = HtmlOptions::default();

    c.bench_function("full_page_large_document", |b| {
        b.iter(|| render_page(black_box(&doc), &options))
    });
}

criterion_group!(
    benches,
    render_landing_template,
    render_large_document,
    html_large_document,
    full_page_large_document
);
criterion_main!(benches);
