use arbor_math::engine;
use arbor_parse::Config;
use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static OPERATORS: &str = "1 + 2 - 3 * 4 / 5 ^ 6 + (7 - 8) * |9 - 10| / (11 + 12) - 13 ^ 14 \
                          + 15.5 * 16.25 - 17 / 18 + (19 * (20 - (21 + 22))) - |23 * 24|";

static FUNCTIONS: &str = "sin(x) + cos(y) - tg(z) * ctg(w) + arcsin(a) - arccos(b) + arctan(c) \
                          + sinh(d) - cosh(f) + tanh(g) - arcsinh(h) + arccosh(k) - arctanh(m) \
                          + ln(n) + log2(p) - log10(q) + log(r; 2) + exp(s) - sqrt(t) + sign(u)";

static CANDIDATES: [(&str, &str); 2] = [("operators", OPERATORS), ("functions", FUNCTIONS)];

fn bench_tokenize(c: &mut Criterion) {
    let engine = engine(Config::default()).unwrap();
    let mut group = c.benchmark_group("tokenize");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| {
            b.iter(|| black_box(engine.tokenize(s).unwrap()));
        });
    }
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
