use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

fn benchmark_parser(c: &mut Criterion) {
    let mut nested = String::from("func nestThoseIfs() {\n");
    for _ in 0..64 {
        nested.push_str("if false != true {\n  print \"\\(i)\"\n");
    }
    for _ in 0..64 {
        nested.push_str("}\n");
    }
    nested.push_str("}\n");

    let files = [
        (
            "Simple",
            r#"
            func foo() {
                return 42
            }
            "#
            .to_owned(),
        ),
        (
            "Medium",
            r#"
            func handle(_ command: Command) async throws -> Int {
                switch command {
                case .start(let delay):
                    guard delay > 0 else { return 0 }
                    try await Task.sleep(nanoseconds: delay * 1_000)
                case .stop, .pause:
                    break
                default:
                    fatalError("unknown \(command)")
                }
                let values = [1, 2, 3].map { $0 * 2 }.filter { x in x > 2 }
                for value in values where value != 4 {
                    print(value)
                }
                return values.reduce(0, +)
            }
            "#
            .to_owned(),
        ),
        ("NestedIfs", nested),
        (
            "Recovery",
            r#"
            func broken( {
              let x = [1, 2,
              if case* ! = x {
              "\(unterminated
            "#
            .to_owned(),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, text) in &files {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_source_file", name), text, |b, text| {
            b.iter(|| {
                let parse = swallow_parse::parse_source_file(text);
                black_box(parse);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
