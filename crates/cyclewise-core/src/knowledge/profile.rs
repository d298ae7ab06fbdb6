//! Phase profile types.

use serde::{Deserialize, Serialize};

use crate::phase::Verdict;

/// Example task keywords per verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecommendations {
    #[serde(default)]
    pub good: Vec<String>,
    #[serde(default)]
    pub ok: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

impl TaskRecommendations {
    pub fn keywords(&self, verdict: Verdict) -> &[String] {
        match verdict {
            Verdict::Good => &self.good,
            Verdict::Ok => &self.ok,
            Verdict::Avoid => &self.avoid,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.ok.is_empty() && self.avoid.is_empty()
    }
}

/// Structured facts about one cycle phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseProfile {
    /// Day range within a typical cycle (e.g. "1-5")
    pub days: String,
    pub description: String,
    #[serde(default)]
    pub hormones: String,
    #[serde(default)]
    pub physical_effects: Vec<String>,
    #[serde(default)]
    pub cognitive_effects: Vec<String>,
    #[serde(default)]
    pub productivity_tips: Vec<String>,
    #[serde(default)]
    pub task_recommendations: TaskRecommendations,
}

/// Grouping a profile field belongs to; reported on every snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PhaseInfo,
    Effects,
    Productivity,
    TaskRecommendations,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::PhaseInfo => "phase_info",
            Section::Effects => "effects",
            Section::Productivity => "productivity",
            Section::TaskRecommendations => "task_recommendations",
        }
    }
}

/// Borrowed view of a single profile value.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

/// One (section, key, value) triple of a profile.
#[derive(Debug, Clone, Copy)]
pub struct ProfileField<'a> {
    pub section: Section,
    pub key: &'static str,
    pub value: FieldValue<'a>,
}

impl PhaseProfile {
    /// Every field in scan order: phase info, effects, tips, recommendations.
    pub fn fields(&self) -> Vec<ProfileField<'_>> {
        use FieldValue::{List, Text};

        let entry = |section, key, value| ProfileField { section, key, value };
        let recs = &self.task_recommendations;

        vec![
            entry(Section::PhaseInfo, "days", Text(&self.days)),
            entry(Section::PhaseInfo, "description", Text(&self.description)),
            entry(Section::PhaseInfo, "hormones", Text(&self.hormones)),
            entry(Section::Effects, "physical", List(&self.physical_effects)),
            entry(Section::Effects, "cognitive", List(&self.cognitive_effects)),
            entry(Section::Productivity, "tips", List(&self.productivity_tips)),
            entry(Section::TaskRecommendations, "good", List(&recs.good)),
            entry(Section::TaskRecommendations, "ok", List(&recs.ok)),
            entry(Section::TaskRecommendations, "avoid", List(&recs.avoid)),
        ]
    }
}
