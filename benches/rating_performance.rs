//! Performance benchmarks for the rating engine

use chrono::NaiveDate;
use courtside::config::EloSettings;
use courtside::rating::{OutcomeModel, SeasonProcessor};
use courtside::standings::standings_for_season;
use courtside::types::{GameRecord, GameStatus};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build a round-robin style schedule: `seasons` seasons of `games_per_season`
/// settled games across a 30-team league
fn synthetic_schedule(seasons: i32, games_per_season: usize) -> Vec<GameRecord> {
    let teams: Vec<String> = (0..30).map(|i| format!("Team {i}")).collect();
    let mut games = Vec::new();
    let mut id = 0i64;

    for season in 0..seasons {
        let start = NaiveDate::from_ymd_opt(2000 + season, 10, 1).unwrap();
        for n in 0..games_per_season {
            let home = &teams[n % teams.len()];
            let away = &teams[(n + 7) % teams.len()];
            id += 1;
            games.push(GameRecord {
                season: 2000 + season,
                game_id: id,
                date: start + chrono::Days::new((n / 8) as u64),
                home_team: home.clone(),
                away_team: away.clone(),
                // Score ranges never overlap, so no tied games are generated
                status: GameStatus::Settled {
                    home_score: 104 + (n % 20) as u32,
                    away_score: 95 + (n % 9) as u32,
                },
            });
        }
    }

    games
}

fn bench_season_processing(c: &mut Criterion) {
    let games = synthetic_schedule(3, 1230);

    c.bench_function("process_three_seasons", |b| {
        b.iter(|| {
            let processor =
                SeasonProcessor::from_games(&games, EloSettings::default()).unwrap();
            black_box(processor.process(games.clone()).unwrap())
        })
    });
}

fn bench_win_probability(c: &mut Criterion) {
    let model = OutcomeModel::new(&EloSettings::default());

    c.bench_function("win_probability", |b| {
        b.iter(|| black_box(model.win_probability(black_box(1550.0), black_box(1470.0), 100.0)))
    });
}

fn bench_standings(c: &mut Criterion) {
    let games = synthetic_schedule(1, 1230);
    let processor = SeasonProcessor::from_games(&games, EloSettings::default()).unwrap();
    let (rated, _) = processor.process(games).unwrap();

    c.bench_function("standings_full_season", |b| {
        b.iter(|| black_box(standings_for_season(&rated, 2000)))
    });
}

criterion_group!(
    benches,
    bench_season_processing,
    bench_win_probability,
    bench_standings
);
criterion_main!(benches);
