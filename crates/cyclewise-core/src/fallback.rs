//! Deterministic advice used whenever generation is off or untrustworthy.
//!
//! Both strategies are total: every phase label, including unrecognized
//! ones, maps to a verdict.

use serde::{Deserialize, Serialize};

use crate::engine::{AdviceResponse, AdviceSource};
use crate::knowledge::KnowledgeBase;
use crate::phase::{Locale, Phase, PhaseLabel, Verdict};
use crate::retrieval::KnowledgeSnippet;

/// Default confidence reported for fallback answers.
pub const DEFAULT_FALLBACK_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// Fixed phase -> (verdict, reason, suggestion) table, ignores the task
    StaticTable,
    /// Match the task against the phase's recommendation keywords
    #[default]
    KeywordRecommendation,
}

impl FallbackStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackStrategy::StaticTable => "static_table",
            FallbackStrategy::KeywordRecommendation => "keyword_recommendation",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPolicy {
    strategy: FallbackStrategy,
    priority: Vec<Verdict>,
    confidence: f64,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(FallbackStrategy::default())
    }
}

impl FallbackPolicy {
    pub fn new(strategy: FallbackStrategy) -> Self {
        Self {
            strategy,
            priority: Verdict::ALL.to_vec(),
            confidence: DEFAULT_FALLBACK_CONFIDENCE,
        }
    }

    /// Order in which verdict keyword lists are checked; first match wins.
    pub fn with_priority(mut self, priority: Vec<Verdict>) -> Self {
        if !priority.is_empty() {
            self.priority = priority;
        }
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        if confidence.is_finite() {
            self.confidence = confidence.clamp(0.0, 1.0);
        }
        self
    }

    pub fn strategy(&self) -> FallbackStrategy {
        self.strategy
    }

    pub fn fallback(
        &self,
        knowledge: &KnowledgeBase,
        phase: &PhaseLabel,
        locale: Locale,
        task: Option<&str>,
        snippets: &[KnowledgeSnippet],
    ) -> AdviceResponse {
        let (verdict, reason, suggestion) = match (phase.known(), self.strategy) {
            // unrecognized labels always get the neutral entry
            (None, _) | (Some(_), FallbackStrategy::StaticTable) => {
                let (verdict, reason, suggestion) = static_entry(phase.known(), locale);
                (verdict, reason.to_string(), suggestion.to_string())
            }
            (Some(known), FallbackStrategy::KeywordRecommendation) => {
                self.keyword_advice(knowledge, known, locale, task, snippets)
            }
        };

        AdviceResponse {
            verdict,
            reason,
            suggestion,
            confidence: self.confidence,
            source: AdviceSource::Fallback,
        }
    }

    fn keyword_advice(
        &self,
        knowledge: &KnowledgeBase,
        phase: Phase,
        locale: Locale,
        task: Option<&str>,
        snippets: &[KnowledgeSnippet],
    ) -> (Verdict, String, String) {
        let recommendations = &knowledge.profile(phase).task_recommendations;
        let task = task.unwrap_or_default().to_lowercase();

        let verdict = self
            .priority
            .iter()
            .copied()
            .find(|verdict| {
                recommendations
                    .keywords(*verdict)
                    .iter()
                    .any(|keyword| !keyword.is_empty() && task.contains(&keyword.to_lowercase()))
            })
            .unwrap_or(Verdict::Ok);

        let reason = match snippets.first() {
            Some(best) => best.content.clone(),
            None => phase_reason(phase, locale).to_string(),
        };
        let suggestion = match locale {
            Locale::Ru => format!("Учитывая фазу {phase}: {reason}"),
            Locale::En => format!("Given the {phase} phase: {reason}"),
        };

        (verdict, reason, suggestion)
    }
}

fn static_entry(phase: Option<Phase>, locale: Locale) -> (Verdict, &'static str, &'static str) {
    use Verdict::{Avoid, Good, Ok};

    match (phase, locale) {
        (Some(Phase::Menstruation), Locale::Ru) => (Avoid, "низкая энергия", "перенеси или упрости задачу"),
        (Some(Phase::Menstruation), Locale::En) => (Avoid, "low energy", "postpone or simplify the task"),
        (Some(Phase::Follicular), Locale::Ru) => (Good, "хорошее время для старта", "запланируй первые шаги"),
        (Some(Phase::Follicular), Locale::En) => (Good, "good time to start", "plan the first steps"),
        (Some(Phase::Ovulation), Locale::Ru) => (Good, "пик коммуникаций", "назначь встречи/презентации"),
        (Some(Phase::Ovulation), Locale::En) => (Good, "peak communication", "schedule meetings/presentations"),
        (Some(Phase::Luteal), Locale::Ru) => (Ok, "фокус и завершение", "разбей на подзадачи"),
        (Some(Phase::Luteal), Locale::En) => (Ok, "focus and completion", "break into subtasks"),
        (None, Locale::Ru) => (Ok, "недостаточно данных", "ориентируйся на самочувствие"),
        (None, Locale::En) => (Ok, "insufficient data", "go by how you feel"),
    }
}

/// Reason used by the keyword strategy when retrieval found nothing.
fn phase_reason(phase: Phase, locale: Locale) -> &'static str {
    match (phase, locale) {
        (Phase::Menstruation, Locale::Ru) => "низкая энергия",
        (Phase::Menstruation, Locale::En) => "low energy",
        (Phase::Follicular, Locale::Ru) => "хорошее время для старта",
        (Phase::Follicular, Locale::En) => "good time to start",
        (Phase::Ovulation, Locale::Ru) => "пик коммуникаций",
        (Phase::Ovulation, Locale::En) => "peak communication",
        (Phase::Luteal, Locale::Ru) => "фокус на завершении",
        (Phase::Luteal, Locale::En) => "focus on completion",
    }
}
