use std::hint::black_box;

use arbor_math::engine;
use arbor_parse::Config;
use arbor_syntax::Tree;
use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

fn benchmark_parser(c: &mut Criterion) {
    let engine = engine(Config::default()).unwrap();
    let inputs = [
        ("Simple", "1 + 2 * 3".to_owned()),
        ("Functions", "sin(x)^2 + cos(x)^2 - log(|y - 1|, 2) / sqrt(pi * e)".to_owned()),
        ("Nested", format!("{}x{}", "(1 + ".repeat(64), ")".repeat(64))),
        ("Long", vec!["2 * x - y / 3"; 64].join(" + ")),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, text) in &inputs {
        let tokens = engine.tokenize(text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_into", name), &tokens, |b, tokens| {
            let mut tree = Tree::new();
            b.iter(|| {
                engine.parse_into(tokens, &mut tree).unwrap();
                black_box(tree.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
