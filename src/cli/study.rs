//! Line-based study loop.
//!
//! Shows each due card's front, reveals the back on Enter, then reads a
//! 1/2/3 rating. `q` ends the session early. Every rating reschedules the
//! card and, with auto-save on, writes the deck straight away.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::deck::{save_deck, update_card};
use crate::domain::{Deck, Difficulty};
use crate::session::{SessionSummary, StudySession};
use crate::srs::update_card_after_review;

#[derive(Debug, Clone, Copy)]
pub struct StudyOptions {
    pub auto_save: bool,
}

impl Default for StudyOptions {
    fn default() -> Self {
        Self { auto_save: true }
    }
}

pub struct StudyOutcome {
    pub deck: Deck,
    pub summary: SessionSummary,
}

enum Prompt {
    Line(String),
    Quit,
}

fn read_prompt<R: BufRead>(input: &mut R) -> Result<Prompt> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Prompt::Quit);
    }
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Ok(Prompt::Quit);
    }
    Ok(Prompt::Line(trimmed.to_string()))
}

/// Read ratings until a valid one arrives. None means the user quit.
fn read_rating<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Difficulty>> {
    loop {
        match read_prompt(input)? {
            Prompt::Quit => return Ok(None),
            Prompt::Line(key) => {
                if let Some(d) = Difficulty::from_key(&key) {
                    return Ok(Some(d));
                }
                writeln!(out, "{}", "Enter 1, 2 or 3 (q to quit)".yellow())?;
            }
        }
    }
}

pub fn run_study<R: BufRead, W: Write>(
    path: &Path,
    mut deck: Deck,
    input: &mut R,
    out: &mut W,
    options: StudyOptions,
    clock: impl Fn() -> DateTime<Utc>,
) -> Result<StudyOutcome> {
    let mut session = StudySession::start(&deck.cards, clock());

    if session.is_complete() {
        writeln!(out, "{}", "No cards due for review!".green())?;
        return Ok(StudyOutcome {
            summary: session.summary(clock()),
            deck,
        });
    }

    let mut unsaved = false;

    while let Some(id) = session.current().map(str::to_string) {
        let Some(card) = deck.card(&id).cloned() else {
            tracing::warn!(card_id = %id, "Card vanished from deck during session");
            session.skip();
            continue;
        };

        let (n, total) = session.position();
        writeln!(out)?;
        writeln!(out, "{}", format!("Card {} of {}", n, total).bold())?;
        writeln!(out, "  {}", card.front)?;
        writeln!(out, "{}", "Press ENTER to reveal answer (q to quit)".dimmed())?;
        out.flush()?;

        if let Prompt::Quit = read_prompt(input)? {
            break;
        }

        writeln!(out, "  {}", card.back.green())?;
        writeln!(out, "Rate difficulty:")?;
        writeln!(out, "{}", "  1 - Hard (reset interval)".dimmed())?;
        writeln!(out, "{}", "  2 - Medium (1.5x interval)".dimmed())?;
        writeln!(out, "{}", "  3 - Easy (2.5x interval)".dimmed())?;
        out.flush()?;

        let Some(difficulty) = read_rating(input, out)? else {
            break;
        };

        let now = clock();
        let updated = update_card_after_review(&card, difficulty, now);
        deck = update_card(&deck, &updated, now);
        session.record(difficulty);

        if options.auto_save {
            deck = save_deck(path, &deck, now)?;
        } else {
            unsaved = true;
        }

        writeln!(
            out,
            "{}",
            format!(
                "Session: {}/{} correct | q to exit",
                session.correct, session.cards_reviewed
            )
            .dimmed()
        )?;
    }

    if unsaved {
        deck = save_deck(path, &deck, clock())?;
    }

    let summary = session.summary(clock());
    writeln!(out)?;
    writeln!(
        out,
        "Reviewed {} of {} due cards, {} correct",
        summary.cards_reviewed, summary.total_due, summary.correct
    )?;
    tracing::info!(
        reviewed = summary.cards_reviewed,
        correct = summary.correct,
        "Study session finished"
    );

    Ok(StudyOutcome { deck, summary })
}
