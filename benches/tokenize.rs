use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gendoc::{from_slice, from_str, from_str_with_options, to_string, ParseOptions};

fn sample_document(lines: usize) -> String {
    let mut text = String::from("Heavy hauler 6x6\n; generated\n");
    for i in 0..lines {
        match i % 4 {
            0 => text.push_str(&format!("node {}, {}.5, -{}.25, true\n", i, i, i)),
            1 => text.push_str(&format!("beam {} {} \"chain link {}\"\n", i, i + 1, i)),
            2 => text.push_str("; section break\n\n"),
            _ => text.push_str(&format!("wheel {}, 0.55, false, \"rim\", {}\n", i, i * 3)),
        }
    }
    text
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 1000, 10000].iter() {
        let text = sample_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_tokenize_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_options");
    let text = sample_document(1000);

    group.bench_function("strict", |b| {
        b.iter(|| from_str_with_options(black_box(&text), ParseOptions::NONE))
    });

    let all = ParseOptions::ALLOW_SLASH_COMMENTS
        | ParseOptions::ALLOW_NAKED_STRINGS
        | ParseOptions::FIRST_LINE_IS_TITLE;
    group.bench_function("all_options", |b| {
        b.iter(|| from_str_with_options(black_box(&text), all))
    });

    group.finish();
}

fn benchmark_garbage(c: &mut Criterion) {
    let noise: Vec<u8> = (0..64 * 1024u32).map(|i| (i * 31 % 251) as u8).collect();

    c.bench_function("tokenize_noise", |b| {
        b.iter(|| from_slice(black_box(&noise), ParseOptions::NONE))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000, 10000].iter() {
        let doc = from_str(&sample_document(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_reader_walk(c: &mut Criterion) {
    let doc = from_str(&sample_document(1000));

    c.bench_function("reader_walk_lines", |b| {
        b.iter(|| {
            let mut reader = doc.reader();
            let mut args = 0;
            while !reader.seek_next_line() {
                args += reader.count_line_args();
            }
            black_box(args)
        })
    });
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_tokenize_options,
    benchmark_garbage,
    benchmark_serialize,
    benchmark_reader_walk
);
criterion_main!(benches);
