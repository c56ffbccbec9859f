//! Text rendering of tournament results

use std::io::{self, Write};

use arena_core::{MatchTranscript, StrategyKind, TournamentResult};

/// Render every section of the tournament report
pub fn render_tournament<W: Write>(result: &TournamentResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "Result Table:")?;
    render_matrix(&result.names, &result.score_matrix(), Some(result.totals.as_slice()), out)?;
    writeln!(out)?;

    render_standings(result, out)?;
    writeln!(out)?;

    render_stochastic(result, out)?;

    writeln!(out, "Max Streak:")?;
    render_matrix(&result.names, &result.streak_matrix(), None, out)?;
    Ok(())
}

/// Square table with a name column; `totals` adds a trailing sum column
fn render_matrix<W: Write>(
    names: &[String],
    cells: &[Vec<u32>],
    totals: Option<&[u64]>,
    out: &mut W,
) -> io::Result<()> {
    let label = names.iter().map(|n| n.len()).max().unwrap_or(0);
    let width = names.iter().map(|n| abbreviate(n).len()).max().unwrap_or(0).max(5);

    write!(out, "{:label$}", "", label = label)?;
    for name in names {
        write!(out, " {:>width$}", abbreviate(name), width = width)?;
    }
    if totals.is_some() {
        write!(out, " {:>width$}", "Sum", width = width + 2)?;
    }
    writeln!(out)?;

    for (i, row) in cells.iter().enumerate() {
        write!(out, "{:label$}", names[i], label = label)?;
        for value in row {
            write!(out, " {:>width$}", value, width = width)?;
        }
        if let Some(totals) = totals {
            write!(out, " {:>width$}", totals[i], width = width + 2)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_standings<W: Write>(result: &TournamentResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "Standings:")?;
    for (rank, standing) in result.standings().iter().enumerate() {
        writeln!(out, "{:>3}. {:<24} {:>7}", rank + 1, standing.name, standing.total_score)?;
    }
    writeln!(out)?;

    if let Some(winner) = result.winner() {
        writeln!(out, "Winner: {}: {}", winner.name, winner.total_score)?;
    }
    Ok(())
}

fn render_stochastic<W: Write>(result: &TournamentResult, out: &mut W) -> io::Result<()> {
    let rows = result.stochastic_rows();
    if rows.is_empty() {
        return Ok(());
    }

    writeln!(out, "Statistics for stochastic strategies:")?;
    for row in rows {
        writeln!(out, "{} ({} trials per pairing):", row.name, trials_of(&row))?;
        for entry in &row.against {
            let s = &entry.summary;
            writeln!(
                out,
                "  vs {:<24} mean={:.2}, median={:.1}, mode={}, variance={:.2}, mean streak={:.2}",
                entry.opponent, s.mean, s.median, s.mode, s.variance, s.mean_streak
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn trials_of(row: &arena_core::StochasticRow) -> u32 {
    row.against.first().map_or(0, |e| e.summary.trials)
}

/// Column header: initials of each dash-separated word
fn abbreviate(name: &str) -> String {
    name.split('-')
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Round-by-round table for a single match
pub fn render_transcript<W: Write>(
    name_a: &str,
    name_b: &str,
    transcript: &MatchTranscript,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{} vs {}", name_a, name_b)?;
    writeln!(
        out,
        "{:>5} {:>2} {:>2} {:>7} {:>11} {:>6}",
        "round", "A", "B", "payoff", "cumulative", "streak"
    )?;
    for r in &transcript.rounds {
        writeln!(
            out,
            "{:>5} {:>2} {:>2} {:>7} {:>11} {:>6}",
            r.round,
            r.move_a,
            r.move_b,
            format!("{}/{}", r.score_a, r.score_b),
            format!("{}/{}", r.cumulative_a, r.cumulative_b),
            r.streak
        )?;
    }
    let result = &transcript.result;
    writeln!(
        out,
        "Final: {} - {}, max streak {}",
        result.score_a, result.score_b, result.max_streak
    )?;
    Ok(())
}

/// Catalog listing
pub fn render_catalog<W: Write>(out: &mut W) -> io::Result<()> {
    for (i, kind) in StrategyKind::ALL.iter().enumerate() {
        let tag = if kind.is_stochastic() { "stochastic" } else { "deterministic" };
        writeln!(out, "{:>2}. {:<22} [{}] {}", i + 1, kind.name(), tag, kind.description())?;
    }
    Ok(())
}
