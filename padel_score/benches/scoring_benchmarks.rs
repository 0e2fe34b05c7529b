use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use padel_score::engine::{Match, MatchConfig, Team, TeamThem, TeamUs, display_score};
use std::hint::black_box;

fn new_match(sets_to_win: u32) -> Match {
    Match::new(MatchConfig {
        team_us: TeamUs {
            player_left: "Ana".to_string(),
            player_right: "Bea".to_string(),
        },
        team_them: TeamThem {
            player1: "Carla".to_string(),
            player2: "Dora".to_string(),
        },
        sets_to_win,
        tiebreak_in_final_set: true,
    })
    .unwrap()
}

/// Deterministic rally winners with plenty of deuce games and tie-breaks
fn rally_winner(i: usize) -> Team {
    if (i * 7 + i / 5) % 2 == 0 {
        Team::Us
    } else {
        Team::Them
    }
}

/// Play a whole match to completion, returning the number of points played
fn play_full_match(sets_to_win: u32) -> usize {
    let mut m = new_match(sets_to_win);
    let mut i = 0;
    while !m.is_completed() {
        m.score_point(rally_winner(i), 1, 2).unwrap();
        i += 1;
    }
    i
}

/// Benchmark a single point in a fresh game
fn bench_score_point(c: &mut Criterion) {
    let m = new_match(2);
    c.bench_function("score_point", |b| {
        b.iter_batched(
            || m.clone(),
            |mut m| m.score_point(black_box(Team::Us), 1, 1),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark scoring and undoing a point deep into a match
fn bench_score_and_undo(c: &mut Criterion) {
    let mut m = new_match(2);
    for i in 0..150 {
        m.score_point(rally_winner(i), 1, 1).unwrap();
    }

    c.bench_function("score_and_undo", |b| {
        b.iter(|| {
            m.score_point(black_box(Team::Them), 0, 1).unwrap();
            m.undo_last_point()
        });
    });
}

/// Benchmark full matches for each format
fn bench_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_match");

    for sets_to_win in [2, 3] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("best_of_{}", sets_to_win * 2 - 1)),
            &sets_to_win,
            |b, &sets_to_win| {
                b.iter(|| play_full_match(black_box(sets_to_win)));
            },
        );
    }

    group.finish();
}

/// Benchmark undoing every point of a finished match
fn bench_undo_full_match(c: &mut Criterion) {
    let mut finished = new_match(2);
    let mut i = 0;
    while !finished.is_completed() {
        finished.score_point(rally_winner(i), 1, 2).unwrap();
        i += 1;
    }

    c.bench_function("undo_full_match", |b| {
        b.iter_batched(
            || finished.clone(),
            |mut m| while m.undo_last_point() {},
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark score rendering
fn bench_display(c: &mut Criterion) {
    let mut m = new_match(2);
    for i in 0..90 {
        m.score_point(rally_winner(i), 1, 1).unwrap();
    }

    c.bench_function("display_score", |b| {
        b.iter(|| display_score(black_box(40), black_box(40), true, Some(Team::Them), false));
    });
    c.bench_function("match_summary", |b| {
        b.iter(|| black_box(&m).summary());
    });
}

criterion_group!(
    scoring_benches,
    bench_score_point,
    bench_score_and_undo,
    bench_full_match,
    bench_undo_full_match
);

criterion_group!(display_benches, bench_display);

criterion_main!(scoring_benches, display_benches);
