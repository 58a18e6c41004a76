use chrono::{DateTime, Utc};

use crate::contest::Contest;
use crate::dto::presence::{JudgePresence, Liveness};
use crate::models::{JudgeProfile, StatusSnapshot};

/// A judge whose last status is younger than this is shown as active.
pub const LIVENESS_THRESHOLD_MS: i64 = 60_000;

/// Presence of one person: the freshest record among all their logical judges.
pub fn presence_of(profile: &JudgeProfile, statuses: &StatusSnapshot, now: DateTime<Utc>) -> JudgePresence {
    let ids = profile.judge_ids();

    let Some((source, record)) = statuses.freshest(&ids) else {
        return JudgePresence {
            judge: profile.name.clone(),
            source: None,
            status: None,
            last_seen: None,
            liveness: Liveness::Never,
            minutes_ago: None,
        };
    };

    let elapsed = now - record.timestamp;
    let liveness = if elapsed.num_milliseconds() < LIVENESS_THRESHOLD_MS {
        Liveness::Active
    } else {
        Liveness::Offline
    };

    JudgePresence {
        judge: profile.name.clone(),
        source: Some(source.clone()),
        status: Some(record.status.clone()),
        last_seen: Some(record.timestamp),
        liveness,
        minutes_ago: Some(elapsed.num_minutes().max(0)),
    }
}

/// One row per person on the roster, in roster order.
pub fn presence_board(contest: &Contest, statuses: &StatusSnapshot, now: DateTime<Utc>) -> Vec<JudgePresence> {
    contest
        .judges()
        .iter()
        .map(|profile| presence_of(profile, statuses, now))
        .collect()
}
