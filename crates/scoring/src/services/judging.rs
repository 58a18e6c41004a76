//! A judge's working loop: dashboard, scoring sheet, submission.

use tracing::{debug, warn};

use super::assignment::{assigned_contestants, neighbors, progress};
use super::gate::JudgeSession;
use super::rubric::RubricSelector;
use crate::Store;
use crate::contest::Contest;
use crate::dto::judging::{Dashboard, DashboardRow, ScoringSheet, SessionResponse};
use crate::error::{Result, ScoringError};
use crate::models::{Contestant, ContestantId, JudgeProfile, Rubric, ScoreDetails, ScoreRecord};

pub struct JudgingService<'a> {
    store: &'a Store,
    contest: &'a Contest,
    rubrics: &'a RubricSelector,
}

impl<'a> JudgingService<'a> {
    pub fn new(store: &'a Store, contest: &'a Contest, rubrics: &'a RubricSelector) -> Self {
        Self {
            store,
            contest,
            rubrics,
        }
    }

    fn profile(&self, session: &JudgeSession) -> Result<&'a JudgeProfile> {
        Ok(self.contest.resolve(session.key())?.0)
    }

    pub fn rubric(&self, session: &JudgeSession) -> Result<&'a Rubric> {
        let profile = self.profile(session)?;
        Ok(self.rubrics.rubric_for(session.category(), profile))
    }

    pub fn assigned(&self, session: &JudgeSession) -> Result<Vec<&'a Contestant>> {
        let profile = self.profile(session)?;
        Ok(assigned_contestants(self.contest, profile, session.category()))
    }

    pub fn session_info(&self, session: &JudgeSession) -> Result<SessionResponse> {
        let rubric = self.rubric(session)?;
        Ok(SessionResponse {
            judge: session.key().clone(),
            judge_id: session.judge_id().clone(),
            category_title: self.contest.category_title(session.category()).to_string(),
            rubric: rubric.clone(),
            max_score: rubric.max_score(),
            assigned: self.assigned(session)?.len(),
            started_at: session.started_at(),
        })
    }

    fn names_hidden(&self, session: &JudgeSession) -> Result<bool> {
        let profile = self.profile(session)?;
        Ok(self.contest.names_hidden(session.category(), profile))
    }

    /// Status updates feed the presence board only. A failed write is logged
    /// and does not interrupt the judge.
    async fn announce(&self, session: &JudgeSession, status: String) {
        if let Err(err) = self.store.statuses().set_status(session.judge_id(), &status).await {
            warn!(judge = %session.judge_id(), error = %err, "failed to publish status");
        }
    }

    pub async fn dashboard(&self, session: &JudgeSession) -> Result<Dashboard> {
        let title = self.contest.category_title(session.category());
        self.announce(session, format!("Viewing Dashboard ({})", title)).await;

        let assigned = self.assigned(session)?;
        let snapshot = self.store.scores().snapshot().await?;
        let judge = session.judge_id();
        let names_hidden = self.names_hidden(session)?;

        let contestants = assigned
            .iter()
            .map(|c| DashboardRow {
                contestant: if names_hidden {
                    (&c.anonymized()).into()
                } else {
                    (*c).into()
                },
                total: snapshot.get(judge, &c.id).map(|r| r.total),
            })
            .collect();

        Ok(Dashboard {
            judge: session.key().clone(),
            category_title: title.to_string(),
            max_score: self.rubric(session)?.max_score(),
            progress: progress(&snapshot, judge, &assigned),
            names_hidden,
            contestants,
        })
    }

    /// Opens the scoring sheet for one assigned contestant.
    ///
    /// Returns `None` when the contestant is not in this judge's assignment.
    pub async fn open(
        &self,
        session: &JudgeSession,
        contestant: &ContestantId,
    ) -> Result<Option<ScoringSheet>> {
        let assigned = self.assigned(session)?;
        let Some((index, previous, next)) = neighbors(&assigned, contestant) else {
            return Ok(None);
        };
        let current = assigned[index];

        self.announce(session, format!("Judging {}", current.display_name())).await;

        let rubric = self.rubric(session)?;
        let existing = self.store.scores().read(session.judge_id(), contestant).await?;
        let names_hidden = self.names_hidden(session)?;

        Ok(Some(ScoringSheet {
            contestant: if names_hidden {
                current.anonymized()
            } else {
                current.clone()
            },
            names_hidden,
            rubric: rubric.clone(),
            max_score: rubric.max_score(),
            existing,
            previous: previous.map(|c| c.id.clone()),
            next: next.map(|c| c.id.clone()),
            position: index + 1,
            assigned: assigned.len(),
        }))
    }

    /// Saves a score. Resubmitting overwrites the earlier record.
    pub async fn submit(
        &self,
        session: &JudgeSession,
        contestant: &ContestantId,
        details: ScoreDetails,
    ) -> Result<ScoreRecord> {
        let assigned = self.assigned(session)?;
        if !assigned.iter().any(|c| c.id == *contestant) {
            if self.contest.contestant(session.category(), contestant).is_none() {
                return Err(ScoringError::NotFound);
            }
            return Err(ScoringError::NotAssigned {
                judge: session.judge_id().clone(),
                contestant: contestant.clone(),
            });
        }

        let rubric = self.rubric(session)?;
        let record = self
            .store
            .scores()
            .write(session.judge_id(), contestant, rubric, details)
            .await?;

        debug!(judge = %session.key(), contestant = %contestant, "submission accepted");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::contest::fixtures;
    use crate::services::gate::LockGate;
    use crate::models::{Category, JudgeId, JudgeKey};

    fn details(pairs: &[(&str, i64)]) -> ScoreDetails {
        pairs
            .iter()
            .map(|(id, value)| (id.to_string(), Decimal::from(*value)))
            .collect()
    }

    async fn session(store: &Store, contest: &Contest, name: &str, category: Category) -> JudgeSession {
        LockGate::new(store, contest)
            .login(JudgeKey::new(name, category))
            .await
            .unwrap()
    }

    fn round_one_full() -> ScoreDetails {
        details(&[("visual", 2), ("creativity", 3), ("ux", 2), ("polish", 1)])
    }

    #[tokio::test]
    async fn dashboard_tracks_progress_and_status() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);
        let mariam = session(&store, &contest, "Mariam", Category::individual()).await;

        service
            .submit(&mariam, &ContestantId::from(3), round_one_full())
            .await
            .unwrap();
        let dashboard = service.dashboard(&mariam).await.unwrap();

        assert_eq!(dashboard.progress.scored, 1);
        assert_eq!(dashboard.progress.total, 5);
        assert_eq!(dashboard.progress.percentage, 20);
        assert_eq!(dashboard.contestants[2].total, Some(Decimal::from(8)));
        assert_eq!(dashboard.contestants[0].total, None);

        let statuses = store.statuses().snapshot().await.unwrap();
        let status = statuses.get(mariam.judge_id()).unwrap();
        assert_eq!(status.status, "Viewing Dashboard (Individual)");
    }

    #[tokio::test]
    async fn sheet_shows_neighbours_and_existing_record() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);
        let rashed = session(&store, &contest, "MrRashed", Category::individual()).await;

        let sheet = service.open(&rashed, &ContestantId::from(4)).await.unwrap().unwrap();
        assert_eq!(sheet.position, 2);
        assert_eq!(sheet.assigned, 3);
        assert_eq!(sheet.previous, Some(ContestantId::from(2)));
        assert_eq!(sheet.next, Some(ContestantId::from(5)));
        assert_eq!(sheet.max_score, Decimal::from(20));
        assert!(sheet.existing.is_none());

        let statuses = store.statuses().snapshot().await.unwrap();
        assert_eq!(statuses.get(rashed.judge_id()).unwrap().status, "Judging Yusuf Karim");

        assert!(service.open(&rashed, &ContestantId::from(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn submissions_outside_assignment_are_refused() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);
        let rashed = session(&store, &contest, "MrRashed", Category::individual()).await;

        let err = service
            .submit(&rashed, &ContestantId::from(1), round_one_full())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::NotAssigned { .. }));

        let err = service
            .submit(&rashed, &ContestantId::from(404), round_one_full())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::NotFound));
    }

    #[tokio::test]
    async fn team_scores_land_under_namespaced_key() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);
        let laayba = session(&store, &contest, "Laayba", Category::team()).await;

        let record = service
            .submit(
                &laayba,
                &ContestantId::from(101),
                details(&[("functionality", 4), ("design", 3), ("content", 1), ("collaboration", 1)]),
            )
            .await
            .unwrap();
        assert_eq!(record.total, Decimal::from(9));

        let scores = store.scores().snapshot().await.unwrap();
        assert!(scores.judge(&JudgeId::from_storage_key("Laayba_team")).is_some());
        assert!(scores.judge(&JudgeId::from_storage_key("Laayba")).is_none());

        let sheet = service.open(&laayba, &ContestantId::from(101)).await.unwrap().unwrap();
        assert_eq!(sheet.existing.unwrap().total, Decimal::from(9));
    }

    #[tokio::test]
    async fn session_info_reports_rubric_and_assignment() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);

        let khaled = session(&store, &contest, "Khaled", Category::team()).await;
        let info = service.session_info(&khaled).unwrap();
        assert_eq!(info.category_title, "Team");
        assert_eq!(info.max_score, Decimal::from(10));
        assert_eq!(info.assigned, 2);
        assert_eq!(info.started_at, khaled.started_at());
    }

    #[tokio::test]
    async fn blind_round_judges_see_contestant_numbers() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);
        let mariam = session(&store, &contest, "Mariam", Category::individual()).await;

        let dashboard = service.dashboard(&mariam).await.unwrap();
        assert!(dashboard.names_hidden);
        assert_eq!(dashboard.contestants[2].contestant.name, "Contestant 3");

        let sheet = service.open(&mariam, &ContestantId::from(3)).await.unwrap().unwrap();
        assert!(sheet.names_hidden);
        assert_eq!(sheet.contestant.display_name(), "Contestant 3");
        assert!(sheet.contestant.members.is_empty());

        let khaled = session(&store, &contest, "Khaled", Category::team()).await;
        let sheet = service.open(&khaled, &ContestantId::from(101)).await.unwrap().unwrap();
        assert_eq!(sheet.contestant.display_name(), "Contestant 101");
        assert!(sheet.contestant.members.is_empty());
    }

    #[tokio::test]
    async fn shortlist_judges_see_real_names() {
        let store = Store::in_memory();
        let contest = fixtures::contest();
        let rubrics = RubricSelector::standard();
        let service = JudgingService::new(&store, &contest, &rubrics);
        let rashed = session(&store, &contest, "MrRashed", Category::individual()).await;

        let dashboard = service.dashboard(&rashed).await.unwrap();
        assert!(!dashboard.names_hidden);
        assert_eq!(dashboard.contestants[0].contestant.name, "Omar, Jr.");

        let sheet = service.open(&rashed, &ContestantId::from(4)).await.unwrap().unwrap();
        assert!(!sheet.names_hidden);
        assert_eq!(sheet.contestant.display_name(), "Yusuf Karim");
    }
}
