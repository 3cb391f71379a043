use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gcpd::document::parse_document;
use gcpd::photometry::{engine::transform, registry::lookup};
use gcpd::raw_table::RawTable;

/// Synthetic uvby page with `n` rows.
fn uvby_page(n: usize) -> String {
    let mut page = String::from(
        "<hr><h3>Selection:</h3><b>Star Name:</b> HD 1<br><hr><pre><b>V\tb-y\tm1\tc1\tbeta</b>\n",
    );
    for i in 0..n {
        let v = 5.0 + (i % 100) as f64 * 0.01;
        page.push_str(&format!("{v:.3}\t0.412\t0.215\t0.380\t2.601\n"));
    }
    page.push_str("</pre><hr><pre><b>Author</b> Olsen E.H.\n</pre><hr>");
    page
}

fn bench_parse(c: &mut Criterion) {
    let page = uvby_page(500);
    c.bench_function("parse_document_500_rows", |b| {
        b.iter(|| parse_document(black_box(&page)).unwrap())
    });
}

fn bench_transform(c: &mut Criterion) {
    let system = lookup("uvby").unwrap();
    let document = parse_document(&uvby_page(500)).unwrap();
    let table = RawTable::from_block(document.data.as_ref().unwrap(), system.layout).unwrap();

    c.bench_function("transform_uvby_500_rows", |b| {
        b.iter(|| transform(system, black_box(&table)))
    });
}

criterion_group!(benches, bench_parse, bench_transform);
criterion_main!(benches);
