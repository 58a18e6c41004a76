//! Per-contestant totals, curves and leaderboards.
//!
//! Every view that shows a sum of scores goes through these functions, so a
//! leaderboard, a dashboard and an export of the same snapshot always agree.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::assignment::contestants_for;
use super::rubric::RubricSelector;
use crate::Store;
use crate::contest::{BoardConfig, Contest};
use crate::dto::leaderboard::{BoardSummary, ContestantSummary, JudgeCell, Leaderboard, LeaderboardEntry};
use crate::error::{Result, ScoringError};
use crate::models::{Category, Contestant, ContestantId, JudgeId, JudgeKey, ScoreSnapshot};
use crate::repository::ScoreFeed;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Keep two decimal places.
    #[default]
    None,
    Floor,
    #[serde(alias = "ceiling")]
    Ceil,
}

/// Sum of the judges' totals for `contestant`; unscored pairs contribute zero.
pub fn total_for(snapshot: &ScoreSnapshot, contestant: &ContestantId, judges: &[JudgeId]) -> Decimal {
    judges
        .iter()
        .filter_map(|judge| snapshot.get(judge, contestant))
        .map(|record| record.total)
        .sum()
}

/// True when every judge has a record for `contestant`. Vacuously true for no judges.
pub fn is_complete(snapshot: &ScoreSnapshot, contestant: &ContestantId, judges: &[JudgeId]) -> bool {
    judges
        .iter()
        .all(|judge| snapshot.get(judge, contestant).is_some())
}

/// Contestants ordered by total, highest first. Equal totals keep roster order.
pub fn rank<'c>(
    snapshot: &ScoreSnapshot,
    contestants: &'c [Contestant],
    judges: &[JudgeId],
) -> Vec<&'c Contestant> {
    let mut ranked: Vec<(&Contestant, Decimal)> = contestants
        .iter()
        .map(|c| (c, total_for(snapshot, &c.id, judges)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(c, _)| c).collect()
}

pub fn apply_curve(raw_total: Decimal, curve: Decimal, rounding: RoundingMode) -> Decimal {
    let curved = raw_total + curve;
    match rounding {
        RoundingMode::None => {
            curved.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
        RoundingMode::Floor => curved.floor().normalize(),
        RoundingMode::Ceil => curved.ceil().normalize(),
    }
}

#[derive(Debug, Clone)]
pub struct BoardJudge {
    pub key: JudgeKey,
    pub id: JudgeId,
    pub max_score: Decimal,
}

/// A board resolved against the contest: the judge set summed and the
/// contestants it covers, in roster order.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub judges: Vec<BoardJudge>,
    pub contestants: Vec<Contestant>,
}

impl BoardView {
    pub fn resolve(contest: &Contest, rubrics: &RubricSelector, board: &BoardConfig) -> Result<Self> {
        let mut judges = Vec::with_capacity(board.judges.len());
        for name in &board.judges {
            let key = JudgeKey::new(name.clone(), board.category.clone());
            let (profile, id) = contest.resolve(&key)?;
            judges.push(BoardJudge {
                max_score: rubrics.rubric_for(&board.category, profile).max_score(),
                key,
                id,
            });
        }

        let roster = contest.roster(&board.category);
        let contestants = match &board.shortlist_of {
            Some(name) => {
                let profile = contest
                    .judge(name)
                    .ok_or_else(|| ScoringError::UnknownJudge(name.clone()))?;
                contestants_for(profile.assignment(&board.category), roster)
                    .into_iter()
                    .cloned()
                    .collect()
            }
            None => roster.to_vec(),
        };

        Ok(Self {
            id: board.id.clone(),
            title: board.title.clone(),
            category: board.category.clone(),
            judges,
            contestants,
        })
    }

    pub fn find(contest: &Contest, rubrics: &RubricSelector, id: &str) -> Result<Option<Self>> {
        contest
            .board(id)
            .map(|board| Self::resolve(contest, rubrics, board))
            .transpose()
    }

    pub fn judge_ids(&self) -> Vec<JudgeId> {
        self.judges.iter().map(|j| j.id.clone()).collect()
    }

    /// Highest achievable raw total: the judges' rubric maxima summed.
    pub fn max_score(&self) -> Decimal {
        self.judges.iter().map(|j| j.max_score).sum()
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            judges: self.judges.iter().map(|j| j.key.human.clone()).collect(),
            max_score: self.max_score(),
            contestants: self.contestants.len(),
        }
    }

    pub fn leaderboard(&self, snapshot: &ScoreSnapshot, curve: Decimal, rounding: RoundingMode) -> Leaderboard {
        let judge_ids = self.judge_ids();

        let entries = rank(snapshot, &self.contestants, &judge_ids)
            .into_iter()
            .enumerate()
            .map(|(index, contestant)| {
                let raw_total = total_for(snapshot, &contestant.id, &judge_ids);
                LeaderboardEntry {
                    rank: index + 1,
                    contestant: ContestantSummary::from(contestant),
                    scores: self
                        .judges
                        .iter()
                        .map(|judge| JudgeCell {
                            judge: judge.key.human.clone(),
                            total: snapshot.get(&judge.id, &contestant.id).map(|r| r.total),
                        })
                        .collect(),
                    raw_total,
                    final_score: apply_curve(raw_total, curve, rounding),
                    is_complete: is_complete(snapshot, &contestant.id, &judge_ids),
                }
            })
            .collect();

        Leaderboard {
            board_id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            judges: self.judges.iter().map(|j| j.key.human.clone()).collect(),
            max_score: self.max_score(),
            curve,
            rounding,
            entries,
        }
    }
}

/// A board kept current from the live score feed.
///
/// Each call recomputes from the latest snapshot; no snapshot outlives
/// [`LiveLeaderboard::close`].
pub struct LiveLeaderboard {
    view: BoardView,
    feed: ScoreFeed,
}

impl LiveLeaderboard {
    pub async fn open(store: &Store, view: BoardView) -> Result<Self> {
        let feed = store.scores().subscribe_all().await?;
        Ok(Self { view, feed })
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn current(&self, curve: Decimal, rounding: RoundingMode) -> Leaderboard {
        self.view.leaderboard(&self.feed.current(), curve, rounding)
    }

    /// Waits for the next score change and returns the recomputed board.
    pub async fn changed(&mut self, curve: Decimal, rounding: RoundingMode) -> Result<Leaderboard> {
        let snapshot = self.feed.changed().await?;
        Ok(self.view.leaderboard(&snapshot, curve, rounding))
    }

    pub fn close(self) {
        self.feed.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;
    use crate::contest::fixtures;
    use crate::models::{ScoreDetails, ScoreRecord};

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn record(total: i64) -> ScoreRecord {
        let details = ScoreDetails::from([("overall".to_string(), Decimal::from(total))]);
        ScoreRecord::from_details(details, Utc::now())
    }

    fn judge(name: &str) -> JudgeId {
        JudgeId::from_storage_key(name)
    }

    fn snapshot(entries: &[(&str, u32, i64)]) -> ScoreSnapshot {
        let mut snapshot = ScoreSnapshot::default();
        for (name, contestant, total) in entries {
            snapshot.insert(judge(name), ContestantId::from(*contestant), record(*total));
        }
        snapshot
    }

    #[test]
    fn totals_skip_missing_records() {
        let snapshot = snapshot(&[("A", 1, 4), ("B", 1, 5), ("A", 2, 7)]);
        let judges = [judge("A"), judge("B"), judge("C")];

        assert_eq!(total_for(&snapshot, &ContestantId::from(1), &judges), Decimal::from(9));
        assert_eq!(total_for(&snapshot, &ContestantId::from(2), &judges), Decimal::from(7));
        assert_eq!(total_for(&snapshot, &ContestantId::from(3), &judges), Decimal::ZERO);
    }

    #[test]
    fn zero_score_counts_as_scored() {
        let snapshot = snapshot(&[("A", 1, 0)]);
        let judges = [judge("A")];

        assert!(is_complete(&snapshot, &ContestantId::from(1), &judges));
        assert!(!is_complete(&snapshot, &ContestantId::from(2), &judges));
        assert!(is_complete(&snapshot, &ContestantId::from(2), &[]));
    }

    #[test]
    fn rank_is_stable_and_idempotent() {
        let contest = fixtures::contest();
        let roster = contest.roster(&Category::individual());
        let snapshot = snapshot(&[("A", 2, 5), ("A", 4, 5), ("A", 3, 9)]);
        let judges = [judge("A")];

        let first: Vec<_> = rank(&snapshot, roster, &judges).iter().map(|c| c.id.to_string()).collect();
        let second: Vec<_> = rank(&snapshot, roster, &judges).iter().map(|c| c.id.to_string()).collect();

        assert_eq!(first, ["3", "2", "4", "1", "5"]);
        assert_eq!(first, second);
    }

    #[test]
    fn curve_and_rounding() {
        assert_eq!(apply_curve(dec("7"), dec("1.5"), RoundingMode::Floor), dec("8"));
        assert_eq!(apply_curve(dec("7"), dec("1.5"), RoundingMode::Ceil), dec("9"));
        assert_eq!(apply_curve(dec("7"), dec("1.5"), RoundingMode::None), dec("8.5"));
        assert_eq!(apply_curve(dec("7.125"), Decimal::ZERO, RoundingMode::None), dec("7.13"));
        assert_eq!(apply_curve(dec("7"), Decimal::ZERO, RoundingMode::None), dec("7"));
        assert_eq!(apply_curve(dec("7"), dec("-0.5"), RoundingMode::Floor), dec("6"));
    }

    #[test]
    fn rounded_zero_is_never_negative() {
        let ceiled = apply_curve(Decimal::ZERO, dec("-0.5"), RoundingMode::Ceil);
        assert!(!ceiled.is_sign_negative());
        assert_eq!(ceiled.to_string(), "0");

        let floored = apply_curve(dec("0.5"), dec("-0.5"), RoundingMode::Floor);
        assert_eq!(floored.to_string(), "0");
    }

    #[test]
    fn rounding_mode_accepts_ceiling_alias() {
        let mode: RoundingMode = serde_json::from_str("\"ceiling\"").unwrap();
        assert_eq!(mode, RoundingMode::Ceil);
    }

    #[test]
    fn board_maxima_come_from_rubrics() {
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();

        let round1 = BoardView::find(&contest, &rubrics, "round1").unwrap().unwrap();
        let round2 = BoardView::find(&contest, &rubrics, "round2").unwrap().unwrap();

        assert_eq!(round1.max_score(), Decimal::from(30));
        assert_eq!(round2.max_score(), Decimal::from(20));
        assert!(BoardView::find(&contest, &rubrics, "nope").unwrap().is_none());
    }

    #[test]
    fn shortlist_board_keeps_roster_order() {
        let contest = fixtures::contest();
        let round2 = BoardView::find(&contest, &RubricSelector::standard(), "round2")
            .unwrap()
            .unwrap();

        let ids: Vec<_> = round2.contestants.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, ["2", "4", "5"]);
    }

    #[test]
    fn namespaced_judges_are_independent_columns() {
        let contest = fixtures::contest();
        let team = BoardView::find(&contest, &RubricSelector::standard(), "team")
            .unwrap()
            .unwrap();
        let snapshot = snapshot(&[("Laayba", 101, 3), ("Laayba_team", 101, 6), ("Khaled", 101, 4)]);

        let board = team.leaderboard(&snapshot, Decimal::ZERO, RoundingMode::None);
        let top = &board.entries[0];
        assert_eq!(top.contestant.id, ContestantId::from(101));
        assert_eq!(top.raw_total, Decimal::from(10));
        assert_eq!(board.judges, ["Laayba", "Khaled"]);
        assert!(top.is_complete);
        assert!(!board.entries[1].is_complete);
    }

    fn full_round_one(values: [i64; 4]) -> ScoreDetails {
        ["visual", "creativity", "ux", "polish"]
            .into_iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), Decimal::from(v)))
            .collect()
    }

    #[tokio::test]
    async fn totals_agree_with_stored_records() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let rubric = rubrics.rubric_for(&Category::individual(), contest.judge("Laayba").unwrap());
        let scores = store.scores();
        let five = ContestantId::from(5);

        scores
            .write(&judge("Laayba"), &five, rubric, full_round_one([2, 3, 3, 2]))
            .await
            .unwrap();

        let snapshot = scores.snapshot().await.unwrap();
        assert!(is_complete(&snapshot, &five, &[judge("Laayba")]));
        assert_eq!(total_for(&snapshot, &five, &[judge("Laayba")]), Decimal::from(10));

        scores
            .write(&judge("Mariam"), &five, rubric, full_round_one([1, 2, 0, 1]))
            .await
            .unwrap();
        let judges = [judge("Laayba"), judge("Mariam"), judge("Khaleel")];

        let mut stored = Decimal::ZERO;
        for j in &judges {
            if let Some(record) = scores.read(j, &five).await.unwrap() {
                stored += record.total;
            }
        }

        let snapshot = scores.snapshot().await.unwrap();
        assert_eq!(total_for(&snapshot, &five, &judges), stored);
        assert_eq!(stored, Decimal::from(14));
        assert!(!is_complete(&snapshot, &five, &judges));
        assert!(is_complete(&snapshot, &five, &judges[..2]));
    }

    #[tokio::test]
    async fn live_board_follows_writes_and_resets() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let view = BoardView::find(&contest, &rubrics, "round1").unwrap().unwrap();
        let mut live = LiveLeaderboard::open(&store, view).await.unwrap();

        let initial = live.current(Decimal::ZERO, RoundingMode::None);
        assert!(initial.entries.iter().all(|e| !e.is_complete && e.raw_total.is_zero()));

        let rubric = rubrics.rubric_for(&Category::individual(), contest.judge("Mariam").unwrap());
        let details: ScoreDetails = [("visual", 2), ("creativity", 3), ("ux", 3), ("polish", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Decimal::from(v)))
            .collect();
        store
            .scores()
            .write(&judge("Mariam"), &ContestantId::from(3), rubric, details)
            .await
            .unwrap();

        let board = live.changed(dec("1.5"), RoundingMode::Floor).await.unwrap();
        assert_eq!(board.entries[0].contestant.id, ContestantId::from(3));
        assert_eq!(board.entries[0].final_score, dec("11"));

        store
            .scores()
            .delete_scope(&[judge("Laayba"), judge("Mariam"), judge("Khaleel")])
            .await
            .unwrap();
        let board = live.changed(Decimal::ZERO, RoundingMode::None).await.unwrap();
        assert!(board.entries.iter().all(|e| e.raw_total.is_zero()));
        assert_eq!(board.entries[0].contestant.id, ContestantId::from(1));

        live.close();
    }
}
