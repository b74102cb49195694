use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use streamgrab::extractor::{extract, normalize, RawFormatDocument};

fn sample_document(records: usize) -> RawFormatDocument {
    let labels = ["144p", "360p", "720p60", "1080p", "audio", "2160p"];
    let formats: Vec<_> = (0..records)
        .map(|i| {
            json!({
                "url": format!("https://cdn.example.com/{}", i),
                "qualityLabel": labels[i % labels.len()],
                "mimeType": "video/mp4; codecs=\"avc1.4d401e\"",
                "contentLength": (i * 1024).to_string(),
                "itag": i
            })
        })
        .collect();
    serde_json::from_value(json!({ "formats": formats, "adaptiveFormats": [] }))
        .expect("sample document")
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalize");

    for records in [10usize, 50, 200] {
        let document = sample_document(records);
        group.bench_with_input(
            BenchmarkId::new("normalize", records),
            &document,
            |b, document| b.iter(|| normalize(black_box(document))),
        );
    }

    group.finish();
}

fn benchmark_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("Identifier Extraction");
    let inputs = [
        ("bare", "dQw4w9WgXcQ"),
        ("short", "https://youtu.be/dQw4w9WgXcQ"),
        ("watch", "https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42s"),
        ("invalid", "not a url at all"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::new("extract", name), &input, |b, input| {
            b.iter(|| extract(black_box(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_extract);
criterion_main!(benches);
