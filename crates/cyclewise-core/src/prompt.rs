//! Prompt assembly for the generation step.
//!
//! Pure string templates: no I/O, same input gives the same output.

use crate::phase::{Locale, PhaseLabel};
use crate::retrieval::KnowledgeSnippet;

struct Labels {
    phase: &'static str,
    task: &'static str,
    retrieved: &'static str,
    from: &'static str,
    nothing_found: &'static str,
    closing: &'static str,
}

const RU: Labels = Labels {
    phase: "Фаза цикла",
    task: "Задача",
    retrieved: "Информация из базы знаний",
    from: "из",
    nothing_found: "(релевантная информация не найдена)",
    closing: "Проанализируй эту задачу с учетом фазы менструального цикла и дай совет.",
};

const EN: Labels = Labels {
    phase: "Cycle phase",
    task: "Task",
    retrieved: "Retrieved knowledge",
    from: "from",
    nothing_found: "(no relevant knowledge found)",
    closing: "Analyze this task considering the menstrual cycle phase and give advice.",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Ru => &RU,
        Locale::En => &EN,
    }
}

/// Builds the grounding context and instruction text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// User-turn text: phase, task, numbered snippets, closing request.
    pub fn build_context(
        &self,
        phase: &PhaseLabel,
        task: &str,
        snippets: &[KnowledgeSnippet],
        locale: Locale,
    ) -> String {
        let l = labels(locale);
        let mut context = format!("{}: {}\n{}: {}\n\n{}:\n", l.phase, phase, l.task, task, l.retrieved);

        if snippets.is_empty() {
            context.push_str(l.nothing_found);
            context.push('\n');
        }
        for (i, snippet) in snippets.iter().enumerate() {
            context.push_str(&format!(
                "{}. {} ({} {})\n",
                i + 1,
                snippet.content,
                l.from,
                snippet.section.as_str()
            ));
        }

        context.push('\n');
        context.push_str(l.closing);
        context
    }

    /// System instruction demanding a JSON object with verdict/reason/suggestion.
    pub fn system_instruction(&self, locale: Locale) -> String {
        match locale {
            Locale::Ru => concat!(
                "Ты - эксперт по женскому здоровью и менструальному циклу. ",
                "Анализируй задачи с учетом фазы менструального цикла и давай персональные советы.\n",
                "Отвечай на русском языке только JSON-объектом ровно с тремя полями: verdict, reason, suggestion.\n",
                "verdict может быть только: \"good\" (отлично), \"ok\" (нормально), \"avoid\" (избегать).\n",
                "reason - объяснение почему, suggestion - конкретный совет.\n",
                "Пример: {\"verdict\": \"good\", \"reason\": \"пик энергии\", \"suggestion\": \"отличное время для важных встреч\"}"
            )
            .to_string(),
            Locale::En => concat!(
                "You are an expert in women's health and the menstrual cycle. ",
                "Analyze tasks considering the menstrual cycle phase and give personalized advice.\n",
                "Respond in English with only a JSON object with exactly three fields: verdict, reason, suggestion.\n",
                "verdict must be one of: \"good\", \"ok\", \"avoid\".\n",
                "reason - explanation why, suggestion - specific advice.\n",
                "Example: {\"verdict\": \"good\", \"reason\": \"peak energy\", \"suggestion\": \"great time for important meetings\"}"
            )
            .to_string(),
        }
    }
}
