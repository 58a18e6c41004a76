use std::collections::HashSet;

use crate::contest::Contest;
use crate::dto::judging::JudgeProgress;
use crate::models::{Category, Contestant, ContestantId, JudgeId, JudgeProfile, ScoreSnapshot};

/// Roster entries a judge may score, in roster order.
///
/// Without an explicit assignment the whole roster is returned. An assignment
/// naming nobody on the roster yields an empty list, not an error.
pub fn contestants_for<'c>(
    assignment: Option<&[ContestantId]>,
    roster: &'c [Contestant],
) -> Vec<&'c Contestant> {
    match assignment {
        Some(assigned) => {
            let assigned: HashSet<&str> = assigned.iter().map(ContestantId::as_str).collect();
            roster
                .iter()
                .filter(|c| assigned.contains(c.id.as_str()))
                .collect()
        }
        None => roster.iter().collect(),
    }
}

pub fn assigned_contestants<'c>(
    contest: &'c Contest,
    judge: &JudgeProfile,
    category: &Category,
) -> Vec<&'c Contestant> {
    contestants_for(judge.assignment(category), contest.roster(category))
}

/// How many of the assigned contestants this judge has scored.
pub fn progress(snapshot: &ScoreSnapshot, judge: &JudgeId, assigned: &[&Contestant]) -> JudgeProgress {
    let scored = assigned
        .iter()
        .filter(|c| snapshot.get(judge, &c.id).is_some())
        .count();
    let total = assigned.len();

    let percentage = if total == 0 {
        0
    } else {
        ((scored as f64 / total as f64) * 100.0).round() as u32
    };

    JudgeProgress {
        scored,
        total,
        percentage,
    }
}

/// Position of `current` in the assignment with its neighbours.
pub fn neighbors<'c>(
    assigned: &[&'c Contestant],
    current: &ContestantId,
) -> Option<(usize, Option<&'c Contestant>, Option<&'c Contestant>)> {
    let index = assigned.iter().position(|c| c.id == *current)?;
    let previous = index.checked_sub(1).map(|i| assigned[i]);
    let next = assigned.get(index + 1).copied();
    Some((index, previous, next))
}
