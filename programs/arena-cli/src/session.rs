//! Interactive human-vs-strategy session
//!
//! The human sits in seat A and enters 0 (cooperate) or 1 (defect) each
//! round. The strategy only sees the human's earlier moves.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use arena_core::{Move, PayoffMatrix, Strategy};

/// Rounds in an interactive session
pub const SESSION_ROUNDS: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Won,
    Lost,
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub human_score: u32,
    pub strategy_score: u32,
    pub human_moves: Vec<Move>,
    pub strategy_moves: Vec<Move>,
}

impl SessionOutcome {
    pub fn verdict(&self) -> Verdict {
        use std::cmp::Ordering;

        match self.human_score.cmp(&self.strategy_score) {
            Ordering::Greater => Verdict::Won,
            Ordering::Less => Verdict::Lost,
            Ordering::Equal => Verdict::Draw,
        }
    }
}

/// Play `rounds` rounds against `opponent`, reading moves from `input`
pub fn play_session<R: BufRead, W: Write>(
    opponent: &mut Strategy,
    rounds: u32,
    payoff: &PayoffMatrix,
    input: &mut R,
    out: &mut W,
) -> Result<SessionOutcome> {
    writeln!(out, "You VS {}", opponent.name())?;
    writeln!(out)?;

    let mut human_moves = Vec::with_capacity(rounds as usize);
    let mut strategy_moves = Vec::with_capacity(rounds as usize);
    let mut human_score = 0u32;
    let mut strategy_score = 0u32;

    for round in 1..=rounds {
        write!(out, "Round {}: ", round)?;
        out.flush()?;
        let human = read_move(input, out)?;

        let strategy = opponent.next_move(&strategy_moves, &human_moves);
        human_moves.push(human);
        strategy_moves.push(strategy);

        let (gained_human, gained_strategy) = payoff.payoff(human, strategy);
        human_score += gained_human;
        strategy_score += gained_strategy;

        writeln!(
            out,
            "{} played {}. Score: {} - {}",
            opponent.name(),
            strategy,
            human_score,
            strategy_score
        )?;
    }

    let outcome = SessionOutcome {
        human_score,
        strategy_score,
        human_moves,
        strategy_moves,
    };

    writeln!(out, "FINAL: {} - {}", human_score, strategy_score)?;
    writeln!(out)?;
    let message = match outcome.verdict() {
        Verdict::Won => "YOU WON!",
        Verdict::Lost => "You lost.",
        Verdict::Draw => "Draw.",
    };
    writeln!(out, "{}", message)?;

    Ok(outcome)
}

/// Read lines until one parses as a move
fn read_move<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Move> {
    let mut line = String::new();
    loop {
        line.clear();
        let read = input.read_line(&mut line).context("failed to read move")?;
        if read == 0 {
            bail!("input closed before the session finished");
        }
        match line.parse::<Move>() {
            Ok(m) => return Ok(m),
            Err(_) => {
                write!(out, "Enter 0 or 1: ")?;
                out.flush()?;
            }
        }
    }
}
