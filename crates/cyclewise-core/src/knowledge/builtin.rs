//! Built-in phase profiles.
//!
//! Content is English; recommendation keywords are listed in English and
//! Russian so that tasks written in either language hit the table.

use super::profile::{PhaseProfile, TaskRecommendations};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn menstruation() -> PhaseProfile {
    PhaseProfile {
        days: "1-5".into(),
        description: "Menstruation: the start of the cycle".into(),
        hormones: "low estrogen, low progesterone".into(),
        physical_effects: list(&[
            "low energy",
            "fatigue",
            "possible cramps",
            "reduced endurance",
            "heightened pain sensitivity",
        ]),
        cognitive_effects: list(&[
            "reduced concentration",
            "slower reactions",
            "increased irritability",
            "harder decision making",
        ]),
        productivity_tips: list(&[
            "plan light tasks",
            "avoid important meetings",
            "take more breaks",
            "delegate complex tasks",
        ]),
        task_recommendations: TaskRecommendations {
            good: list(&[
                "rest day",
                "take a rest",
                "have a rest",
                "planning",
                "journaling",
                "reflection",
                "отдых",
                "планирование",
            ]),
            ok: list(&[
                "routine",
                "admin",
                "email",
                "рутинные задачи",
                "административная работа",
            ]),
            avoid: list(&[
                "presentation",
                "negotiation",
                "intensive",
                "complex",
                "analysis",
                "важные презентации",
                "сложные переговоры",
                "интенсивная работа",
            ]),
        },
    }
}

pub(crate) fn follicular() -> PhaseProfile {
    PhaseProfile {
        days: "6-10".into(),
        description: "Follicular phase: follicles mature".into(),
        hormones: "rising estrogen".into(),
        physical_effects: list(&[
            "rising energy",
            "improved mood",
            "higher motivation",
            "better overall wellbeing",
        ]),
        cognitive_effects: list(&[
            "better concentration",
            "higher creativity",
            "sharper memory",
            "strong motivation to learn",
        ]),
        productivity_tips: list(&[
            "ideal time for new projects",
            "plan important tasks",
            "focus on learning",
            "launch new initiatives",
        ]),
        task_recommendations: TaskRecommendations {
            good: list(&[
                "planning",
                "learning",
                "study",
                "creative",
                "new project",
                "brainstorm",
                "планирование",
                "обучение",
                "творческие задачи",
                "новые проекты",
            ]),
            ok: list(&[
                "analysis",
                "research",
                "strategy",
                "аналитическая работа",
                "исследования",
                "разработка стратегий",
            ]),
            avoid: list(&["routine", "repetitive", "рутинные задачи", "повторяющаяся работа"]),
        },
    }
}

pub(crate) fn ovulation() -> PhaseProfile {
    PhaseProfile {
        days: "11-15".into(),
        description: "Ovulation: release of the egg".into(),
        hormones: "estrogen peak, LH surge".into(),
        physical_effects: list(&[
            "peak energy",
            "maximum endurance",
            "higher confidence",
            "better coordination",
        ]),
        cognitive_effects: list(&[
            "peak concentration",
            "strongest communication skills",
            "higher confidence",
            "effective decision making",
        ]),
        productivity_tips: list(&[
            "ideal time for important meetings",
            "schedule presentations",
            "hold negotiations",
            "take on leadership tasks",
        ]),
        task_recommendations: TaskRecommendations {
            good: list(&[
                "presentation",
                "meeting",
                "negotiation",
                "pitch",
                "interview",
                "leadership",
                "презентации",
                "встречи",
                "переговоры",
                "лидерские задачи",
            ]),
            ok: list(&[
                "teamwork",
                "team work",
                "team building",
                "social",
                "networking",
                "командная работа",
                "социальные активности",
                "сетевые мероприятия",
            ]),
            avoid: list(&["solo work", "routine", "одиночная работа", "рутинные задачи"]),
        },
    }
}

pub(crate) fn luteal() -> PhaseProfile {
    PhaseProfile {
        days: "16-28".into(),
        description: "Luteal phase: preparing for menstruation".into(),
        hormones: "high progesterone, falling estrogen".into(),
        physical_effects: list(&[
            "declining energy",
            "possible mood swings",
            "heightened sensitivity",
            "possible headaches",
        ]),
        cognitive_effects: list(&[
            "reduced concentration",
            "sharper critical eye",
            "stronger analytical skills",
            "close attention to detail",
        ]),
        productivity_tips: list(&[
            "focus on finishing projects",
            "do detailed work",
            "plan ahead",
            "delegate new tasks",
        ]),
        task_recommendations: TaskRecommendations {
            good: list(&[
                "finish",
                "wrap up",
                "detailed work",
                "analysis",
                "planning",
                "review",
                "завершение проектов",
                "детальная работа",
                "анализ",
                "планирование",
            ]),
            ok: list(&[
                "admin",
                "report",
                "organize",
                "organizing",
                "organise",
                "административные задачи",
                "отчетность",
                "организация",
            ]),
            avoid: list(&[
                "new project",
                "presentation",
                "negotiation",
                "launch",
                "новые проекты",
                "важные презентации",
                "сложные переговоры",
            ]),
        },
    }
}

/// Generic low-confidence guidance for labels outside the known set.
pub(crate) fn unknown() -> PhaseProfile {
    PhaseProfile {
        days: String::new(),
        description: "Unknown cycle phase: not enough data".into(),
        hormones: String::new(),
        physical_effects: Vec::new(),
        cognitive_effects: Vec::new(),
        productivity_tips: list(&["go by how you feel", "keep the plan flexible"]),
        task_recommendations: TaskRecommendations::default(),
    }
}
