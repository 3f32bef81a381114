use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SOURCE: &str = r#"
switch value { case .a where x >= 10: return x ?? 0 default: break } // trailing
guard let y = try? await compute(a: 1, b: 2.5) else { throw Failure.bad("\(y)") }
switch value { case .a where x >= 10: return x ?? 0 default: break } // trailing
guard let y = try? await compute(a: 1, b: 2.5) else { throw Failure.bad("\(y)") }
switch value { case .a where x >= 10: return x ?? 0 default: break } // trailing
guard let y = try? await compute(a: 1, b: 2.5) else { throw Failure.bad("\(y)") }
switch value { case .a where x >= 10: return x ?? 0 default: break } // trailing
guard let y = try? await compute(a: 1, b: 2.5) else { throw Failure.bad("\(y)") }
switch value { case .a where x >= 10: return x ?? 0 default: break } // trailing
guard let y = try? await compute(a: 1, b: 2.5) else { throw Failure.bad("\(y)") }
"#;

static STRINGS: &str = r####"
let plain = "text \(array.map({ "\($0)" }).joined(separator: ",")) text"
let raw = #"a "quoted" \#(value) and \(not interpolated)"#
let multi = """
    line one
    line \(two)
    """
let regex = /(?<identifier>[[:alpha:]]\w*) = (?<hex>[0-9A-F]+)/
"####;

static IDENTIFIERS: &str =
    "It was the year when they finally immanentized the Eschaton It was the year when they \
     finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton It was the year when \
     they finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton";

static CANDIDATES: [(&str, &str); 3] = [
    ("identifiers", IDENTIFIERS),
    ("keywords_operators_and_punctuators", SOURCE),
    ("string_literals", STRINGS),
];

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| {
            b.iter(|| black_box(swallow_tokenizer::tokenize(s)))
        });
    }
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
