use std::sync::Arc;

use crate::models::{Category, Criterion, JudgeProfile, Rubric};

/// Which judges a rubric applies to. Unset fields match anything.
#[derive(Debug, Clone)]
pub struct RubricRule {
    pub category: Category,
    pub judge: Option<String>,
    pub round: Option<u8>,
    pub rubric: Arc<Rubric>,
}

impl RubricRule {
    fn matches(&self, category: &Category, judge: &JudgeProfile) -> bool {
        self.category == *category
            && self.judge.as_deref().is_none_or(|name| name == judge.name)
            && self.round.is_none_or(|round| round == judge.round)
    }
}

/// Picks the rubric for a (category, judge) pair.
///
/// Every place that needs criteria or a maximum (scoring sheets, write
/// validation, leaderboard maxima) goes through the same selector.
#[derive(Debug, Clone)]
pub struct RubricSelector {
    rules: Vec<RubricRule>,
    fallback: Arc<Rubric>,
}

impl Default for RubricSelector {
    fn default() -> Self {
        Self::standard()
    }
}

impl RubricSelector {
    pub fn new(fallback: Rubric) -> Self {
        Self {
            rules: Vec::new(),
            fallback: Arc::new(fallback),
        }
    }

    /// Round one, shortlist round and team rubrics.
    pub fn standard() -> Self {
        Self::new(round_one())
            .with_rule(RubricRule {
                category: Category::individual(),
                judge: None,
                round: Some(2),
                rubric: Arc::new(shortlist_round()),
            })
            .with_rule(RubricRule {
                category: Category::team(),
                judge: None,
                round: None,
                rubric: Arc::new(team()),
            })
    }

    /// Adds a rule. Rules added earlier take precedence.
    pub fn with_rule(mut self, rule: RubricRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rubric_for(&self, category: &Category, judge: &JudgeProfile) -> &Rubric {
        self.rules
            .iter()
            .find(|rule| rule.matches(category, judge))
            .map(|rule| rule.rubric.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }
}

fn round_one() -> Rubric {
    Rubric::new(
        "Round 1",
        vec![
            Criterion::new("visual", "Visual Appeal", 2, "Design quality, layout, and aesthetic consistency."),
            Criterion::new("creativity", "Creativity & Originality", 3, "Innovation, uniqueness, and concept strength."),
            Criterion::new("ux", "User Experience (UX)", 3, "Navigation, usability, accessibility, responsiveness."),
            Criterion::new("polish", "Completeness & Polish", 2, "Functionality, attention to detail, finished feel."),
        ],
    )
}

fn shortlist_round() -> Rubric {
    Rubric::new(
        "Round 2",
        vec![
            Criterion::new("visual", "Visual Appeal", 4, "Design quality, layout, and aesthetic consistency."),
            Criterion::new("creativity", "Creativity & Originality", 5, "Innovation, uniqueness, and concept strength."),
            Criterion::new("ux", "User Experience (UX)", 5, "Navigation, usability, accessibility, responsiveness."),
            Criterion::new("polish", "Completeness & Polish", 3, "Functionality, attention to detail, finished feel."),
            Criterion::new("presentation", "Presentation", 3, "Clarity and confidence when walking through the work."),
        ],
    )
}

fn team() -> Rubric {
    Rubric::new(
        "Team",
        vec![
            Criterion::new("functionality", "Functionality", 4, "Features work as intended across pages."),
            Criterion::new("design", "Design", 3, "Visual consistency and layout."),
            Criterion::new("content", "Content", 2, "Accuracy and quality of the written content."),
            Criterion::new("collaboration", "Collaboration", 1, "Evidence that every member contributed."),
        ],
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::contest::fixtures;

    #[test]
    fn standard_tiers() {
        let contest = fixtures::contest();
        let selector = RubricSelector::standard();
        let individual = Category::individual();

        let laayba = contest.judge("Laayba").unwrap();
        let rashed = contest.judge("MrRashed").unwrap();

        assert_eq!(selector.rubric_for(&individual, laayba).max_score(), Decimal::from(10));
        assert_eq!(selector.rubric_for(&individual, rashed).max_score(), Decimal::from(20));
        assert_eq!(selector.rubric_for(&Category::team(), laayba).name, "Team");
    }

    #[test]
    fn judge_specific_rules_take_precedence_when_added_first() {
        let contest = fixtures::contest();
        let custom = Rubric::new("Custom", vec![Criterion::new("overall", "Overall", 5, "")]);
        let selector = RubricSelector::new(round_one())
            .with_rule(RubricRule {
                category: Category::individual(),
                judge: Some("Mariam".to_string()),
                round: None,
                rubric: Arc::new(custom),
            })
            .with_rule(RubricRule {
                category: Category::individual(),
                judge: None,
                round: None,
                rubric: Arc::new(shortlist_round()),
            });

        let mariam = contest.judge("Mariam").unwrap();
        let khaleel = contest.judge("Khaleel").unwrap();
        assert_eq!(selector.rubric_for(&Category::individual(), mariam).name, "Custom");
        assert_eq!(selector.rubric_for(&Category::individual(), khaleel).name, "Round 2");
    }

    #[test]
    fn unmatched_pairs_fall_back() {
        let contest = fixtures::contest();
        let selector = RubricSelector::standard();
        let rubric = selector.rubric_for(&Category::new("design"), contest.judge("Mariam").unwrap());
        assert_eq!(rubric.name, "Round 1");
    }
}
