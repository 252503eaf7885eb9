//! Card management commands and deck listings.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Result, anyhow};
use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;

use crate::deck::{self, load_deck, save_deck};
use crate::domain::{Card, Deck};
use crate::srs;

fn due_label(card: &Card, now: DateTime<Utc>) -> String {
    if card.is_new() {
        return "new".to_string();
    }
    match card.next_review {
        Some(next) if next <= now => format!("due {}", next.to_rfc3339_opts(SecondsFormat::Secs, true)),
        Some(next) => format!("next {}", next.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => "due".to_string(),
    }
}

pub fn print_list<W: Write>(out: &mut W, deck: &Deck, due_only: bool, now: DateTime<Utc>) -> Result<()> {
    let cards: Vec<&Card> = if due_only {
        srs::select_due(&deck.cards, now)
    } else {
        deck.cards.iter().collect()
    };

    if cards.is_empty() {
        let msg = if due_only { "No cards due for review" } else { "No cards in deck" };
        writeln!(out, "{}", msg.dimmed())?;
        return Ok(());
    }

    for card in cards {
        writeln!(
            out,
            "{}  {} → {}  {}",
            card.id.dimmed(),
            card.front,
            card.back,
            format!("[{}, interval {}]", due_label(card, now), card.interval).dimmed()
        )?;
    }
    Ok(())
}

pub fn print_stats<W: Write>(out: &mut W, deck: &Deck, now: DateTime<Utc>) -> Result<()> {
    let new_cards = deck.cards.iter().filter(|c| c.is_new()).count();
    writeln!(out, "{}", deck.name.cyan().bold())?;
    if !deck.description.is_empty() {
        writeln!(out, "{}", deck.description.dimmed())?;
    }
    writeln!(out, "Total cards: {}", deck.cards.len())?;
    writeln!(out, "Due now: {}", srs::due_count(&deck.cards, now))?;
    writeln!(out, "New: {}", new_cards)?;
    Ok(())
}

pub fn add<W: Write>(path: &Path, front: &str, back: &str, out: &mut W, now: DateTime<Utc>) -> Result<Deck> {
    let current = load_deck(path)?;
    let updated = deck::add_card(&current, deck::new_card_id(), front, back, now)?;
    let saved = save_deck(path, &updated, now)?;

    if let Some(card) = saved.cards.last() {
        writeln!(out, "Added card {}", card.id.bold())?;
    }
    Ok(saved)
}

pub fn edit<W: Write>(
    path: &Path,
    id: &str,
    front: Option<&str>,
    back: Option<&str>,
    out: &mut W,
    now: DateTime<Utc>,
) -> Result<Deck> {
    if front.is_none() && back.is_none() {
        return Err(anyhow!("Nothing to change: pass --front and/or --back"));
    }
    let current = load_deck(path)?;
    let updated = deck::edit_card_text(&current, id, front, back, now)?;
    let saved = save_deck(path, &updated, now)?;
    writeln!(out, "Updated card {}", id.bold())?;
    Ok(saved)
}

pub fn delete<R: BufRead, W: Write>(
    path: &Path,
    id: &str,
    skip_confirm: bool,
    input: &mut R,
    out: &mut W,
    now: DateTime<Utc>,
) -> Result<Deck> {
    let current = load_deck(path)?;
    let card = current
        .card(id)
        .ok_or_else(|| deck::EditError::CardNotFound(id.to_string()))?;

    if !skip_confirm {
        writeln!(out, "Are you sure you want to delete this card?")?;
        writeln!(out, "  {}", card.front.bold())?;
        write!(out, "{}", "[y/N] ".dimmed())?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Cancelled")?;
            return Ok(current);
        }
    }

    let updated = deck::delete_card(&current, id, now);
    let saved = save_deck(path, &updated, now)?;
    writeln!(out, "Deleted card {}", id.bold())?;
    Ok(saved)
}
