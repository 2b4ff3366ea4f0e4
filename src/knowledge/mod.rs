//! Read-only domain knowledge: classifications (doshas), ingredient effects and health goals.
//!
//! Scorers only see the [`DomainKnowledge`] trait. [`StaticKnowledge`] is the built-in
//! implementation backed by compiled-in tables; it carries no state.

mod tables;


use std::fmt;

use serde::Serialize;

use tables::{CLASSIFICATIONS, ClassificationRow, GOALS, INGREDIENTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
/// Canonical compatibility classification.
pub enum Classification {
    Vata,
    Pitta,
    Kapha,
}

impl Classification {
    /// All classifications in table order.
    pub const ALL: [Classification; 3] = [
        Classification::Vata,
        Classification::Pitta,
        Classification::Kapha,
    ];

    /// Upper-case name, as it appears in item attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Vata => "VATA",
            Classification::Pitta => "PITTA",
            Classification::Kapha => "KAPHA",
        }
    }

    /// Parses a name case-insensitively, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
    }

    fn table_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How an item's tags interact with a classification.
pub enum CompatibilityLabel {
    /// At least one known tag balances the classification.
    Balancing {
        /// Balancing tags, in item order.
        ingredients: Vec<String>,
    },
    /// No tag balances it, but at least one aggravates it.
    Aggravating {
        /// Aggravating tags, in item order.
        ingredients: Vec<String>,
    },
    /// No tag is known to affect the classification.
    Neutral,
}

impl CompatibilityLabel {
    pub fn is_neutral(&self) -> bool {
        matches!(self, CompatibilityLabel::Neutral)
    }
}

impl fmt::Display for CompatibilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityLabel::Balancing { ingredients } => {
                write!(f, "balancing: {}", ingredients.join(", "))
            }
            CompatibilityLabel::Aggravating { ingredients } => {
                write!(f, "aggravating: {}", ingredients.join(", "))
            }
            CompatibilityLabel::Neutral => f.write_str("neutral"),
        }
    }
}

/// Lookup service consulted by the domain-rule scorer and domain search.
pub trait DomainKnowledge: Send + Sync {
    /// Maps a raw classification name to its canonical form, or `None` when unknown.
    fn canonical_classification(&self, raw: &str) -> Option<Classification>;

    /// Labels a set of item tags against `classification`. Never affects scores.
    fn item_compatibility(&self, tags: &[String], classification: Classification)
    -> CompatibilityLabel;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Reference data for one classification.
pub struct ClassificationProfile {
    pub classification: Classification,
    pub elements: Vec<&'static str>,
    pub qualities: Vec<&'static str>,
    pub seasons: Vec<&'static str>,
    pub recommended_tastes: Vec<&'static str>,
    pub avoid_foods: Vec<&'static str>,
    pub imbalance_symptoms: Vec<&'static str>,
}

impl From<&ClassificationRow> for ClassificationProfile {
    fn from(row: &ClassificationRow) -> Self {
        Self {
            classification: row.classification,
            elements: row.elements.to_vec(),
            qualities: row.qualities.to_vec(),
            seasons: row.seasons.to_vec(),
            recommended_tastes: row.recommended_tastes.to_vec(),
            avoid_foods: row.avoid_foods.to_vec(),
            imbalance_symptoms: row.imbalance_symptoms.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Effect of one ingredient on one classification.
pub struct IngredientCompatibility {
    pub ingredient: &'static str,
    pub sanskrit_name: &'static str,
    /// `true` when the effect balances the classification.
    pub compatible: bool,
    pub effect: &'static str,
    pub benefits: Vec<&'static str>,
    pub contraindications: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Health goal guidance for one classification.
pub struct GoalProfile {
    pub goal: &'static str,
    pub classification: Classification,
    pub description: &'static str,
    /// Herbs for the goal in general.
    pub recommended_herbs: Vec<&'static str>,
    /// Herbs suited to the classification specifically.
    pub classification_herbs: Vec<&'static str>,
    pub lifestyle_tips: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
/// Built-in knowledge tables.
pub struct StaticKnowledge;

impl StaticKnowledge {
    pub fn new() -> Self {
        Self
    }

    pub fn classification_profile(&self, classification: Classification) -> ClassificationProfile {
        ClassificationProfile::from(&CLASSIFICATIONS[classification.table_index()])
    }

    /// Effect of `ingredient` (exact table name) on `classification`, or `None` when the
    /// ingredient is not in the table.
    pub fn ingredient_compatibility(
        &self,
        ingredient: &str,
        classification: Classification,
    ) -> Option<IngredientCompatibility> {
        let row = INGREDIENTS.iter().find(|row| row.name == ingredient)?;
        let effect = row.effects[classification.table_index()];
        Some(IngredientCompatibility {
            ingredient: row.name,
            sanskrit_name: row.sanskrit_name,
            compatible: effect.contains("balances"),
            effect,
            benefits: row.benefits.to_vec(),
            contraindications: row.contraindications.to_vec(),
        })
    }

    /// Guidance for a health goal such as `"stress relief"` or `"joint_health"`.
    pub fn goal_profile(&self, goal: &str, classification: Classification) -> Option<GoalProfile> {
        let key = goal_key(goal);
        let row = GOALS.iter().find(|row| row.key == key)?;
        Some(GoalProfile {
            goal: row.key,
            classification,
            description: row.description,
            recommended_herbs: row.recommended_herbs.to_vec(),
            classification_herbs: row.by_classification[classification.table_index()].to_vec(),
            lifestyle_tips: row.lifestyle_tips.to_vec(),
        })
    }

    /// Known health goal keys.
    pub fn goals(&self) -> impl Iterator<Item = &'static str> {
        GOALS.iter().map(|row| row.key)
    }

    /// Ingredient-based fit in `[0, 1]`: 0.5 base, +0.1 per balancing tag, -0.05 per
    /// aggravating tag. Unknown tags do not count.
    pub fn compatibility_score(&self, tags: &[String], classification: Classification) -> f32 {
        let score = tags
            .iter()
            .filter_map(|tag| self.ingredient_compatibility(tag, classification))
            .fold(0.5_f32, |acc, info| {
                if info.compatible {
                    acc + 0.1
                } else if info.effect.contains("increase") {
                    acc - 0.05
                } else {
                    acc
                }
            });
        score.clamp(0.0, 1.0)
    }
}

impl DomainKnowledge for StaticKnowledge {
    fn canonical_classification(&self, raw: &str) -> Option<Classification> {
        Classification::parse(raw)
    }

    fn item_compatibility(
        &self,
        tags: &[String],
        classification: Classification,
    ) -> CompatibilityLabel {
        let mut balancing = Vec::new();
        let mut aggravating = Vec::new();

        for tag in tags {
            let Some(info) = self.ingredient_compatibility(tag, classification) else {
                continue;
            };
            if info.compatible {
                balancing.push(tag.clone());
            } else if info.effect.contains("increase") {
                aggravating.push(tag.clone());
            }
        }

        if !balancing.is_empty() {
            CompatibilityLabel::Balancing {
                ingredients: balancing,
            }
        } else if !aggravating.is_empty() {
            CompatibilityLabel::Aggravating {
                ingredients: aggravating,
            }
        } else {
            CompatibilityLabel::Neutral
        }
    }
}

fn goal_key(goal: &str) -> String {
    goal.trim()
        .to_ascii_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
