//! Performance benchmarks for scoring large SBOMs.
//!
//! Run with: cargo bench --bench scoring

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sbom_compliance::parsers::parse_sbom_str;
use sbom_compliance::reports::{create_reporter_with_options, ReportContext, ReportFormat};
use sbom_compliance::{ComplianceEngine, Document, Score};
use std::fmt::Write as _;
use std::hint::black_box;

/// Generate a CycloneDX JSON SBOM with a dependency chain of `count` components.
fn generate_cyclonedx(count: usize) -> String {
    let mut components = String::new();
    let mut dependencies = String::new();
    for i in 0..count {
        let purl = format!("pkg:npm/component-{i}@1.{}.{}", i % 10, i % 100);
        if i > 0 {
            components.push(',');
            dependencies.push(',');
        }
        let _ = write!(
            components,
            r#"{{"bom-ref":"{purl}","name":"component-{i}","version":"1.{}.{}","purl":"{purl}","supplier":{{"name":"Vendor {}"}}}}"#,
            i % 10,
            i % 100,
            i % 7
        );
        let next = if i + 1 < count {
            format!(r#""pkg:npm/component-{}@1.{}.{}""#, i + 1, (i + 1) % 10, (i + 1) % 100)
        } else {
            String::new()
        };
        let _ = write!(dependencies, r#"{{"ref":"{purl}","dependsOn":[{next}]}}"#);
    }

    format!(
        r#"{{"bomFormat":"CycloneDX","specVersion":"1.5","metadata":{{"timestamp":"2024-01-01T00:00:00Z","tools":[{{"name":"bench"}}]}},"components":[{components}],"dependencies":[{dependencies}]}}"#
    )
}

fn bench_parse_and_score(c: &mut Criterion) {
    let engine = ComplianceEngine::ntia().expect("NTIA table is complete");
    let mut group = c.benchmark_group("parse_and_score");

    for size in [100, 1_000, 5_000] {
        let content = generate_cyclonedx(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| {
                let document = parse_sbom_str(black_box(content)).expect("bench SBOM parses");
                let store = engine.evaluate(document.as_ref());
                black_box(Score::for_document(&store, engine.standard()))
            });
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = ComplianceEngine::ntia().expect("NTIA table is complete");
    let document = parse_sbom_str(&generate_cyclonedx(5_000)).expect("bench SBOM parses");

    c.bench_function("evaluate_5000_components", |b| {
        b.iter(|| black_box(engine.evaluate(black_box(document.as_ref()))));
    });
}

fn bench_evaluate_all(c: &mut Criterion) {
    let engine = ComplianceEngine::ntia().expect("NTIA table is complete");
    let documents: Vec<Box<dyn Document>> = (0..16)
        .map(|_| parse_sbom_str(&generate_cyclonedx(500)).expect("bench SBOM parses"))
        .collect();
    let refs: Vec<&dyn Document> = documents.iter().map(|d| d.as_ref()).collect();

    c.bench_function("evaluate_all_16x500", |b| {
        b.iter(|| black_box(engine.evaluate_all(black_box(&refs))));
    });
}

fn bench_reports(c: &mut Criterion) {
    let engine = ComplianceEngine::ntia().expect("NTIA table is complete");
    let document = parse_sbom_str(&generate_cyclonedx(1_000)).expect("bench SBOM parses");
    let store = engine.evaluate(document.as_ref());
    let ctx = ReportContext::new(engine.standard(), &store, "bench.cdx.json");

    let mut group = c.benchmark_group("report_1000_components");
    for format in [ReportFormat::Json, ReportFormat::Detailed, ReportFormat::Basic] {
        let reporter = create_reporter_with_options(format, false, true);
        group.bench_function(format.to_string(), |b| {
            b.iter(|| black_box(reporter.generate(black_box(&ctx))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_and_score,
    bench_evaluate,
    bench_evaluate_all,
    bench_reports
);
criterion_main!(benches);
