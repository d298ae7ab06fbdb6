//! Phase-indexed knowledge base.
//!
//! The profile set is fixed once constructed: either the built-in English
//! profiles or a TOML file loaded at startup. Lookups never fail; labels
//! outside the known set resolve to the `unknown` profile.
//!
//! TOML shape (one table per phase, `unknown` optional):
//!
//! ```toml
//! [ovulation]
//! days = "11-15"
//! description = "Ovulation"
//! productivity_tips = ["schedule presentations"]
//!
//! [ovulation.task_recommendations]
//! good = ["presentation"]
//! ```

mod builtin;
mod profile;

pub use profile::{FieldValue, PhaseProfile, ProfileField, Section, TaskRecommendations};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::KnowledgeError;
use crate::phase::{Phase, PhaseLabel};

/// Structured facts for every phase plus the unknown-phase guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    menstruation: PhaseProfile,
    follicular: PhaseProfile,
    ovulation: PhaseProfile,
    luteal: PhaseProfile,
    #[serde(default = "builtin::unknown")]
    unknown: PhaseProfile,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The profiles shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            menstruation: builtin::menstruation(),
            follicular: builtin::follicular(),
            ovulation: builtin::ovulation(),
            luteal: builtin::luteal(),
            unknown: builtin::unknown(),
        }
    }

    /// Parse a knowledge document. All four phases are required.
    pub fn from_toml_str(content: &str) -> Result<Self, KnowledgeError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a knowledge file.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| KnowledgeError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn profile(&self, phase: Phase) -> &PhaseProfile {
        match phase {
            Phase::Menstruation => &self.menstruation,
            Phase::Follicular => &self.follicular,
            Phase::Ovulation => &self.ovulation,
            Phase::Luteal => &self.luteal,
        }
    }

    /// Profile for a caller-supplied label; unknown labels get generic guidance.
    pub fn profile_for(&self, label: &PhaseLabel) -> &PhaseProfile {
        match label.known() {
            Some(phase) => self.profile(phase),
            None => &self.unknown,
        }
    }

    /// Strict lookup by key for metadata queries. `None` means not found.
    pub fn get(&self, key: &str) -> Option<&PhaseProfile> {
        Phase::from_key(key).map(|phase| self.profile(phase))
    }

    pub fn unknown(&self) -> &PhaseProfile {
        &self.unknown
    }

    /// Known profiles in cycle order.
    pub fn phases(&self) -> impl Iterator<Item = (Phase, &PhaseProfile)> + '_ {
        Phase::ALL.into_iter().map(move |phase| (phase, self.profile(phase)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Verdict;

    #[test]
    fn test_builtin_has_all_phases() {
        let kb = KnowledgeBase::builtin();
        let days: Vec<_> = kb.phases().map(|(_, p)| p.days.as_str()).collect();
        assert_eq!(days, ["1-5", "6-10", "11-15", "16-28"]);
    }

    #[test]
    fn test_profile_for_unrecognized_returns_unknown() {
        let kb = KnowledgeBase::builtin();
        let profile = kb.profile_for(&PhaseLabel::parse("phase7"));
        assert_eq!(profile, kb.unknown());
        assert!(profile.task_recommendations.is_empty());
    }

    #[test]
    fn test_get_is_strict() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.get("ovulation").is_some());
        assert!(kb.get("unknown").is_none());
        assert!(kb.get("phase7").is_none());
    }

    #[test]
    fn test_ovulation_recommends_presentations() {
        let kb = KnowledgeBase::builtin();
        let recs = &kb.profile(Phase::Ovulation).task_recommendations;
        assert!(recs.keywords(Verdict::Good).iter().any(|k| k == "presentation"));
    }

    #[test]
    fn test_from_toml_requires_every_phase() {
        let doc = r#"
            [menstruation]
            days = "1-5"
            description = "m"
        "#;
        assert!(matches!(
            KnowledgeBase::from_toml_str(doc),
            Err(KnowledgeError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_from_toml_round_trips_builtin() {
        let kb = KnowledgeBase::builtin();
        let doc = toml::to_string(&kb).unwrap();
        let parsed = KnowledgeBase::from_toml_str(&doc).unwrap();
        assert_eq!(parsed, kb);
    }
}
