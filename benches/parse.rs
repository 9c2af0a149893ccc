use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pokernow_history::history::HistoryParser;

/// Everything between the start and end lines of one showdown hand.
const HAND_BODY: [&str; 14] = [
    r#"Player stacks: #1 ""Alice @ p1"" (100) | #2 ""Bob @ p2"" (100) | #3 ""Carol @ p3"" (100)"#,
    r#"""Bob @ p2"" posts a small blind of 1"#,
    r#"""Carol @ p3"" posts a big blind of 2"#,
    r#"""Alice @ p1"" raises to 6"#,
    r#"""Bob @ p2"" folds"#,
    r#"""Carol @ p3"" calls 6"#,
    "Flop: [2♠] [K♣] [9♥]",
    r#"""Carol @ p3"" checks"#,
    r#"""Alice @ p1"" bets 8"#,
    r#"""Carol @ p3"" calls 8"#,
    "Turn: 2♠, K♣, 9♥ [5♦]",
    "River: 2♠, K♣, 9♥, 5♦ [10♣]",
    r#"""Alice @ p1"" shows a A♠, 10♥."#,
    r#"""Alice @ p1"" collected 29 from pot"#,
];

/// A log of `hands` complete hands, each going to showdown.
fn synthetic_log(hands: usize) -> String {
    let mut bodies = Vec::with_capacity(hands * (HAND_BODY.len() + 2));
    for hand in 1..=hands {
        bodies.push(format!(
            r#"-- starting hand #{hand} (id: h{hand}) (dealer: ""Alice @ p1"") --"#
        ));
        bodies.extend(HAND_BODY.iter().map(|body| body.to_string()));
        bodies.push(format!("-- ending hand #{hand} --"));
    }

    std::iter::once("entry,at,order".to_string())
        .chain(
            bodies
                .iter()
                .enumerate()
                .map(|(order, body)| format!("{body},2024-01-01T00:00:00.000Z,{}", order + 1)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_str");
    let parser = HistoryParser::default();

    for hands in [10, 100, 1000] {
        let log = synthetic_log(hands);
        group.bench_with_input(BenchmarkId::new("hands", hands), &log, |b, log| {
            b.iter(|| parser.parse_str(log).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
