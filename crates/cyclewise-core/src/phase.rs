//! Cycle phases, verdicts and locales.
//!
//! These are the value types every other module keys on. Parsing never
//! fails: an unknown phase label becomes [`PhaseLabel::Unrecognized`] and an
//! unknown locale becomes [`Locale::En`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four named segments of the menstrual cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Phase; 4] = [
        Phase::Menstruation,
        Phase::Follicular,
        Phase::Ovulation,
        Phase::Luteal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menstruation => "menstruation",
            Phase::Follicular => "follicular",
            Phase::Ovulation => "ovulation",
            Phase::Luteal => "luteal",
        }
    }

    /// Case-insensitive lookup by key; `None` for anything else.
    pub fn from_key(key: &str) -> Option<Phase> {
        let key = key.trim().to_lowercase();
        Phase::ALL.into_iter().find(|p| p.as_str() == key)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase as supplied by a caller: either recognized or kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhaseLabel {
    Known(Phase),
    Unrecognized(String),
}

impl PhaseLabel {
    pub fn parse(raw: &str) -> Self {
        match Phase::from_key(raw) {
            Some(phase) => PhaseLabel::Known(phase),
            None => PhaseLabel::Unrecognized(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<Phase> {
        match self {
            PhaseLabel::Known(phase) => Some(*phase),
            PhaseLabel::Unrecognized(_) => None,
        }
    }

    /// Label as it should appear in prompts and suggestions.
    pub fn as_str(&self) -> &str {
        match self {
            PhaseLabel::Known(phase) => phase.as_str(),
            PhaseLabel::Unrecognized(raw) => raw,
        }
    }
}

impl From<Phase> for PhaseLabel {
    fn from(phase: Phase) -> Self {
        PhaseLabel::Known(phase)
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical recommendation for performing a task in a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Ok,
    Avoid,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Good, Verdict::Ok, Verdict::Avoid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Good => "good",
            Verdict::Ok => "ok",
            Verdict::Avoid => "avoid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    /// Accepts the three literals after trimming and lowercasing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" => Ok(Verdict::Good),
            "ok" => Ok(Verdict::Ok),
            "avoid" => Ok(Verdict::Avoid),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}

/// Language used for prompts and fallback phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Maps "ru" to Russian and everything else to English.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "ru" => Locale::Ru,
            _ => Locale::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_key_is_case_insensitive() {
        assert_eq!(Phase::from_key("Ovulation"), Some(Phase::Ovulation));
        assert_eq!(Phase::from_key("  luteal "), Some(Phase::Luteal));
        assert_eq!(Phase::from_key("phase7"), None);
    }

    #[test]
    fn test_phase_label_keeps_raw_text() {
        let label = PhaseLabel::parse("phase7");
        assert_eq!(label, PhaseLabel::Unrecognized("phase7".to_string()));
        assert_eq!(label.as_str(), "phase7");
        assert_eq!(label.known(), None);
    }

    #[test]
    fn test_verdict_from_str() {
        assert_eq!(" Good ".parse::<Verdict>(), Ok(Verdict::Good));
        assert_eq!("avoid".parse::<Verdict>(), Ok(Verdict::Avoid));
        assert!("great".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_verdict_serializes_as_literal() {
        let json = serde_json::to_string(&Verdict::Avoid).unwrap();
        assert_eq!(json, "\"avoid\"");
    }

    #[test]
    fn test_locale_unknown_falls_back_to_english() {
        assert_eq!(Locale::parse("ru"), Locale::Ru);
        assert_eq!(Locale::parse("de"), Locale::En);
        assert_eq!(Locale::default(), Locale::Ru);
    }
}
