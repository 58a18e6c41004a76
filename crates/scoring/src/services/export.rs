//! Flat comma-separated rendering of a leaderboard.

use rust_decimal::Decimal;

use super::aggregation::RoundingMode;
use crate::dto::leaderboard::Leaderboard;

pub const DELIMITER: char = ',';

/// Shown for "not scored yet", so it cannot be confused with a zero.
pub const PLACEHOLDER: &str = "-";

/// Header row followed by one row per ranked contestant.
pub fn format(board: &Leaderboard) -> Vec<Vec<String>> {
    let mut header = vec![
        "Rank".to_string(),
        "Contestant".to_string(),
        "Section".to_string(),
        "Group".to_string(),
        "Website".to_string(),
    ];
    header.extend(board.judges.iter().cloned());
    header.push(format!("Raw Total (/{})", board.max_score.normalize()));
    header.push("Curve".to_string());
    header.push("Final Total".to_string());
    header.push("Status".to_string());

    let mut rows = Vec::with_capacity(board.entries.len() + 1);
    rows.push(header);

    for entry in &board.entries {
        let contestant = &entry.contestant;
        let mut row = vec![
            entry.rank.to_string(),
            contestant.name.clone(),
            or_placeholder(contestant.section.as_deref()),
            or_placeholder(contestant.team.as_deref()),
            or_placeholder(contestant.link.as_deref()),
        ];
        row.extend(entry.scores.iter().map(|cell| match cell.total {
            Some(total) => total.normalize().to_string(),
            None => PLACEHOLDER.to_string(),
        }));
        row.push(entry.raw_total.normalize().to_string());
        row.push(board.curve.normalize().to_string());
        row.push(format_final(entry.final_score, board.rounding));
        row.push(if entry.is_complete { "Complete" } else { "Pending" }.to_string());
        rows.push(row);
    }

    rows
}

pub fn to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|field| escape(field))
                .collect::<Vec<_>>()
                .join(&DELIMITER.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn format_final(value: Decimal, rounding: RoundingMode) -> String {
    match rounding {
        RoundingMode::None => format!("{:.2}", value),
        RoundingMode::Floor | RoundingMode::Ceil => value.normalize().to_string(),
    }
}

fn escape(field: &str) -> String {
    if field.contains(DELIMITER) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
