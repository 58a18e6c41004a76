//! Static contest definition: categories, roster, judges and leaderboard boards.
//!
//! Loaded once at startup and never mutated while the contest runs.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::{Result, ScoringError};
use crate::models::{Category, CategoryInfo, Contestant, ContestantId, JudgeId, JudgeKey, JudgeProfile};
use crate::sync::StorePath;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestConfig {
    pub name: String,
    pub categories: Vec<CategoryInfo>,
    pub contestants: Vec<Contestant>,
    pub judges: Vec<JudgeProfile>,
    #[serde(default)]
    pub boards: Vec<BoardConfig>,
}

/// A leaderboard: the judge set whose scores are summed, over one category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoardConfig {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Judge names, in column order.
    pub judges: Vec<String>,
    /// Restricts the board to this judge's assigned contestants.
    #[serde(default)]
    pub shortlist_of: Option<String>,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

impl ContestConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if self.name.trim().is_empty() {
            report.errors.push("Contest name is required".to_string());
        }
        if self.categories.is_empty() {
            report
                .errors
                .push("At least one category is required".to_string());
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(&category.id) {
                report
                    .errors
                    .push(format!("Duplicate category id: '{}'", category.id));
            }
            if StorePath::root().child(category.id.as_str()).is_err() {
                report.errors.push(format!(
                    "Category id '{}' cannot be used as a store key",
                    category.id
                ));
            }
        }

        let mut contestant_ids = HashSet::new();
        let mut per_category: HashMap<&Category, usize> = HashMap::new();
        for contestant in &self.contestants {
            if !contestant_ids.insert(&contestant.id) {
                report
                    .errors
                    .push(format!("Duplicate contestant id: '{}'", contestant.id));
            }
            if StorePath::root().child(contestant.id.as_str()).is_err() {
                report.errors.push(format!(
                    "Contestant id '{}' cannot be used as a store key",
                    contestant.id
                ));
            }
            if !category_ids.contains(&contestant.category) {
                report.errors.push(format!(
                    "Contestant '{}' has unknown category '{}'",
                    contestant.id, contestant.category
                ));
            }
            if contestant.display_name().is_empty() {
                report
                    .warnings
                    .push(format!("Contestant '{}' has no name or members", contestant.id));
            }
            *per_category.entry(&contestant.category).or_default() += 1;
        }

        for category in &self.categories {
            if !per_category.contains_key(&category.id) {
                report
                    .warnings
                    .push(format!("Category '{}' has no contestants", category.id));
            }
        }

        let mut judge_names = HashSet::new();
        let mut storage_keys: HashMap<JudgeId, JudgeKey> = HashMap::new();
        for judge in &self.judges {
            if judge.name.trim().is_empty() {
                report.errors.push("Judge name cannot be empty".to_string());
                continue;
            }
            if !judge_names.insert(judge.name.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate judge name: '{}'", judge.name));
            }
            if judge.categories.is_empty() {
                report
                    .errors
                    .push(format!("Judge '{}' judges no category", judge.name));
            }

            for category in &judge.categories {
                if !category_ids.contains(category) {
                    report.errors.push(format!(
                        "Judge '{}' has unknown category '{}'",
                        judge.name, category
                    ));
                }
                let Some(id) = judge.judge_id(category) else {
                    continue;
                };
                if StorePath::root().child(id.as_str()).is_err() {
                    report
                        .errors
                        .push(format!("Judge id '{}' cannot be used as a store key", id));
                }
                if let Some(existing) = storage_keys.insert(id.clone(), judge.key(category)) {
                    report.errors.push(format!(
                        "Judges {} and {} both resolve to store key '{}'",
                        existing,
                        judge.key(category),
                        id
                    ));
                }
            }

            for (category, assigned) in &judge.assignments {
                if !judge.judges(category) {
                    report.errors.push(format!(
                        "Judge '{}' has assignments for '{}' but does not judge it",
                        judge.name, category
                    ));
                }
                for id in assigned {
                    let on_roster = self
                        .contestants
                        .iter()
                        .any(|c| c.id == *id && c.category == *category);
                    if !on_roster {
                        report.warnings.push(format!(
                            "Judge '{}' is assigned contestant '{}' which is not on the '{}' roster",
                            judge.name, id, category
                        ));
                    }
                }
            }
        }

        let mut board_ids = HashSet::new();
        for board in &self.boards {
            if !board_ids.insert(board.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate board id: '{}'", board.id));
            }
            if !category_ids.contains(&board.category) {
                report.errors.push(format!(
                    "Board '{}' has unknown category '{}'",
                    board.id, board.category
                ));
            }
            if board.judges.is_empty() {
                report
                    .warnings
                    .push(format!("Board '{}' has no judges", board.id));
            }
            for name in board.judges.iter().chain(board.shortlist_of.iter()) {
                match self.judges.iter().find(|j| j.name == *name) {
                    None => report.errors.push(format!(
                        "Board '{}' references unknown judge '{}'",
                        board.id, name
                    )),
                    Some(judge) if !judge.judges(&board.category) => {
                        report.errors.push(format!(
                            "Board '{}' uses judge '{}' who does not judge '{}'",
                            board.id, name, board.category
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        if !report.errors.is_empty() {
            Err(ScoringError::InvalidConfig(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

/// Validated contest, indexed for lookups.
#[derive(Debug, Clone)]
pub struct Contest {
    config: ContestConfig,
    rosters: BTreeMap<Category, Vec<Contestant>>,
}

impl Contest {
    pub fn new(config: ContestConfig) -> Result<Self> {
        let report = config.validate()?;
        report.log_warnings();

        let mut rosters: BTreeMap<Category, Vec<Contestant>> = BTreeMap::new();
        for contestant in &config.contestants {
            rosters
                .entry(contestant.category.clone())
                .or_default()
                .push(contestant.clone());
        }

        Ok(Self { config, rosters })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(ContestConfig::load(path)?)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn categories(&self) -> &[CategoryInfo] {
        &self.config.categories
    }

    pub fn category_title<'a>(&'a self, category: &'a Category) -> &'a str {
        self.config
            .categories
            .iter()
            .find(|c| c.id == *category)
            .map(|c| c.title.as_str())
            .unwrap_or(category.as_str())
    }

    /// True when `judge` scores `category` without seeing contestant names.
    pub fn names_hidden(&self, category: &Category, judge: &JudgeProfile) -> bool {
        self.config
            .categories
            .iter()
            .find(|c| c.id == *category)
            .is_some_and(|c| c.blind_rounds.contains(&judge.round))
    }

    /// Contestants of `category` in roster order.
    pub fn roster(&self, category: &Category) -> &[Contestant] {
        self.rosters.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contestant(&self, category: &Category, id: &ContestantId) -> Option<&Contestant> {
        self.roster(category).iter().find(|c| c.id == *id)
    }

    pub fn judges(&self) -> &[JudgeProfile] {
        &self.config.judges
    }

    pub fn judge(&self, name: &str) -> Option<&JudgeProfile> {
        self.config.judges.iter().find(|j| j.name == name)
    }

    /// Resolves the identity supplied by the authentication boundary to a
    /// roster entry and its store key.
    pub fn resolve(&self, key: &JudgeKey) -> Result<(&JudgeProfile, JudgeId)> {
        let profile = self
            .judge(&key.human)
            .ok_or_else(|| ScoringError::UnknownJudge(key.human.clone()))?;
        let id = profile
            .judge_id(&key.category)
            .ok_or_else(|| ScoringError::UnknownJudge(key.to_string()))?;
        Ok((profile, id))
    }

    /// Every logical judge scoring `category`.
    pub fn judge_ids_in(&self, category: &Category) -> Vec<JudgeId> {
        self.config
            .judges
            .iter()
            .filter_map(|j| j.judge_id(category))
            .collect()
    }

    pub fn boards(&self) -> &[BoardConfig] {
        &self.config.boards
    }

    pub fn board(&self, id: &str) -> Option<&BoardConfig> {
        self.config.boards.iter().find(|b| b.id == id)
    }
}
