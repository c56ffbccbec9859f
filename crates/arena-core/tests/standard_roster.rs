use arena_core::{run_tournament, Roster, StrategyKind, TournamentConfig};

fn config() -> TournamentConfig {
    TournamentConfig::default().with_seed(2024).with_trials(50)
}

fn index(roster: &Roster, kind: StrategyKind) -> usize {
    roster.position(kind).expect("kind in standard roster")
}

#[test]
fn standard_roster_full_round_robin() {
    let mut roster = Roster::standard(Some(2024));
    let result = run_tournament(&mut roster, &config()).unwrap();

    assert_eq!(result.size(), 15);
    let scores = result.score_matrix();
    assert_eq!(scores.len(), 15);
    assert!(scores.iter().all(|row| row.len() == 15));

    let ac = index(&roster, StrategyKind::AlwaysCooperate);
    let ad = index(&roster, StrategyKind::AlwaysDefect);
    let mirror = index(&roster, StrategyKind::Mirror);
    let grim = index(&roster, StrategyKind::GrimTrigger);

    assert_eq!(scores[ac][ad], 0);
    assert_eq!(scores[ad][ac], 1000);
    assert_eq!(scores[mirror][mirror], 600);
    assert_eq!(scores[grim][ad], 199);
    assert_eq!(scores[ad][grim], 204);

    let streaks = result.streak_matrix();
    assert_eq!(streaks[ac][ad], 200);
    assert_eq!(streaks[mirror][mirror], 0);
    assert_eq!(streaks[grim][ad], 1);

    for (i, row) in scores.iter().enumerate() {
        assert_eq!(result.totals[i], row.iter().map(|&s| s as u64).sum::<u64>());
    }

    let winner = result.winner().unwrap();
    let best = *result.totals.iter().max().unwrap();
    assert_eq!(winner.total_score, best);
    assert_eq!(winner.index, result.totals.iter().position(|&t| t == best).unwrap());

    // Seven stochastic strategies, each with a full row of summaries
    let rows = result.stochastic_rows();
    assert_eq!(rows.len(), 7);
    for row in &rows {
        assert_eq!(row.against.len(), 15);
        for entry in &row.against {
            assert_eq!(entry.summary.trials, 50);
            assert!(entry.summary.variance >= 0.0);
            assert!(entry.summary.mean_streak <= 200.0);
        }
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let mut roster = Roster::standard(Some(5));
        run_tournament(&mut roster, &config().with_trials(10)).unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.score_matrix(), b.score_matrix());
    assert_eq!(a.streak_matrix(), b.streak_matrix());
    assert_eq!(a.standings(), b.standings());
}
