//! Plain-text charts for `bones stats`.

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::Write;

use super::history::{SessionRecord, StatsTotals};
use super::summary::humanize_duration;

pub const DEFAULT_DAYS: u16 = 14;

/// Longest window `bones stats` accepts.
pub const MAX_DAYS: u16 = 3650;

const BAR: char = '█';

/// Words written per local calendar day, for the `days` days ending at
/// `today`. Days without sessions are present with zero.
pub fn words_per_day(records: &[SessionRecord], today: NaiveDate, days: usize) -> Vec<(NaiveDate, u64)> {
    let mut per_day: BTreeMap<NaiveDate, u64> = (0..days)
        .map_while(|back| today.checked_sub_days(Days::new(back as u64)))
        .map(|day| (day, 0))
        .collect();

    for record in records {
        if let Some(words) = per_day.get_mut(&record.timestamp.date_naive()) {
            *words += record.word_count;
        }
    }
    per_day.into_iter().collect()
}

/// One row per day: `MM-DD │████ 532`. Bars scale to the largest day so the
/// row fits in `width` columns.
pub fn render_chart(series: &[(NaiveDate, u64)], width: usize) -> String {
    let max = series.iter().map(|(_, words)| *words).max().unwrap_or(0);
    let label_width = max.to_string().len();
    // "MM-DD │" plus " " and the count.
    let room = width.saturating_sub(8 + 1 + label_width).max(1);

    let mut out = String::new();
    for (day, words) in series {
        let bar_len = if max == 0 {
            0
        } else {
            ((*words as u128 * room as u128) / max as u128) as usize
        };
        let bar: String = std::iter::repeat(BAR).take(bar_len).collect();
        let _ = writeln!(out, "{} │{} {}", day.format("%m-%d"), bar, words);
    }
    out
}

pub fn render_totals(totals: &StatsTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sessions: {}", totals.sessions);
    let _ = writeln!(out, "Words: {}", totals.words);
    let _ = writeln!(out, "Time: {}", humanize_duration(totals.seconds));
    let _ = writeln!(out, "Average WPM: {:.1}", totals.average_wpm);
    let _ = writeln!(out, "Best WPM: {}", totals.best_wpm);
    if let Some(accuracy) = totals.average_accuracy {
        let _ = writeln!(out, "Spelling accuracy: {:.1}%", accuracy);
    }
    out
}
