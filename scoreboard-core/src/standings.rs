//! Standings derivation
//!
//! A pure function of a tournament's roster and match list. Nothing here is
//! stored; callers recompute the table whenever they need it.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::matches::Match;
use crate::participant::Participant;

/// Points awarded for a win
pub const WIN_POINTS: u32 = 3;

/// Points awarded to each side of a draw
pub const DRAW_POINTS: u32 = 1;

/// Per-participant summary of a tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub id: String,
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
}

impl StandingsRow {
    fn empty(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
            games: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0,
        }
    }

    fn record_win(&mut self) {
        self.games += 1;
        self.wins += 1;
        self.points += WIN_POINTS;
    }

    fn record_loss(&mut self) {
        self.games += 1;
        self.losses += 1;
    }

    fn record_draw(&mut self) {
        self.games += 1;
        self.draws += 1;
        self.points += DRAW_POINTS;
    }
}

/// Compute the standings table of one tournament.
///
/// Matches that reference a participant missing from `participants` are
/// skipped entirely. Rows are ordered by points, then wins (both
/// descending), then name.
pub fn compute_standings(participants: &[Participant], matches: &[Match]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = participants.iter().map(StandingsRow::empty).collect();
    let index: HashMap<&str, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    for m in matches {
        let (Some(&home), Some(&away)) = (
            index.get(m.home_participant_id.as_str()),
            index.get(m.away_participant_id.as_str()),
        ) else {
            continue;
        };

        match m.home_participant_score.cmp(&m.away_participant_score) {
            Ordering::Greater => {
                rows[home].record_win();
                rows[away].record_loss();
            }
            Ordering::Less => {
                rows[away].record_win();
                rows[home].record_loss();
            }
            Ordering::Equal => {
                rows[home].record_draw();
                rows[away].record_draw();
            }
        }
    }

    rows.sort_by(compare_rows);
    rows
}

/// Points desc, wins desc, name asc.
///
/// Names compare by [`name_sort_key`] first, then case-insensitively, then by
/// exact spelling; id breaks remaining ties.
fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| name_sort_key(&a.name).cmp(&name_sort_key(&b.name)))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Lowercased name with Latin diacritics folded to their base letter, so
/// "Ärger" sorts with the A's and "Šarić" with the S's.
///
/// This approximates a locale-aware collation for Latin scripts only; other
/// scripts fall back to code point order.
fn name_sort_key(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).map(fold_diacritic).collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' | 'ß' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// Render a standings table as fixed-width text
pub fn render_standings(rows: &[StandingsRow]) -> String {
    if rows.is_empty() {
        return "No participants yet.\n".to_string();
    }

    let width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Participant".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>5}  {:>4}  {:>5}  {:>5}  {:>3}",
        "Participant", "Games", "Wins", "Loses", "Draws", "Pts"
    );
    let _ = writeln!(out, "{}", "-".repeat(width + 34));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<width$}  {:>5}  {:>4}  {:>5}  {:>5}  {:>3}",
            row.name, row.games, row.wins, row.losses, row.draws, row.points
        );
    }
    out
}

/// Render past matches as `home vs away  h - a`, resolving names from the roster
pub fn render_match_list(participants: &[Participant], matches: &[Match]) -> String {
    if matches.is_empty() {
        return "No matches yet.\n".to_string();
    }

    let names: HashMap<&str, &str> = participants
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    let name_of = |id: &str| names.get(id).copied().unwrap_or("?").to_string();

    let mut out = String::new();
    for m in matches {
        let _ = writeln!(
            out,
            "{} vs {}  {} - {}",
            name_of(&m.home_participant_id),
            name_of(&m.away_participant_id),
            m.home_participant_score,
            m.away_participant_score
        );
    }
    out
}
