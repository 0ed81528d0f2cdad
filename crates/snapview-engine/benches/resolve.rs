use criterion::{Criterion, criterion_group, criterion_main};
use snapview_engine::render::{RenderOptions, SnapshotFormatter};
use snapview_engine::{CallVocabulary, SnapshotContent, SnapshotRecord, locate_test};

fn generate_test_file(suites: usize, tests_per_suite: usize) -> String {
    let mut text = String::new();
    for s in 0..suites {
        text.push_str(&format!("describe('Suite {s}', () => {{\n"));
        for t in 0..tests_per_suite {
            text.push_str(&format!(
                "  it('case {t}', () => {{\n    const tree = render({{ id: {t} }});\n    tree.matchSnapshot('view {t}');\n  }});\n"
            ));
        }
        text.push_str("});\n\n");
    }
    text
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.sample_size(10);

    let text = generate_test_file(50, 20);
    let vocabulary = CallVocabulary::default();
    let caret = text.rfind("const tree").unwrap();

    group.bench_function("last_test_in_large_file", |b| {
        b.iter(|| locate_test(std::hint::black_box(&text), caret, &vocabulary));
    });

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    group.sample_size(10);

    let record: SnapshotRecord = (0..100)
        .map(|i| {
            (
                format!("Suite case {i} 1"),
                format!("<div className=\"c{i}\">\n  <img src=\"/img/{i}.png\" />\n</div>"),
            )
        })
        .collect();
    let content = SnapshotContent::Record(record);
    let formatter = SnapshotFormatter::new(RenderOptions::new("/pub"));

    group.bench_function("hundred_entries", |b| {
        b.iter(|| formatter.format(std::hint::black_box(&content), &[]));
    });

    group.finish();
}

criterion_group!(benches, bench_locate, bench_format);
criterion_main!(benches);
