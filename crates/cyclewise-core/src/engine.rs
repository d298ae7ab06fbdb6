//! Advice engine.
//!
//! Retrieval -> prompt -> generator -> resolver, with the fallback policy
//! catching every failure. [`AdviceEngine::advise`] has no error path: a
//! missing generator, a transport error, a timeout and unparsable output all
//! end in a fallback answer.
//!
//! The engine holds no mutable state and can be shared across tasks behind
//! an `Arc`. Dropping an `advise` future abandons the in-flight generator
//! request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::fallback::{FallbackPolicy, FallbackStrategy};
use crate::generator::{GeminiGenerator, GenerationError, Generator};
use crate::knowledge::{KnowledgeBase, PhaseProfile};
use crate::phase::{Locale, Phase, PhaseLabel, Verdict};
use crate::prompt::PromptBuilder;
use crate::resolver::{ParseError, ResponseResolver};
use crate::retrieval::{KnowledgeSnippet, Retriever, DEFAULT_LIMIT};

/// Default upper bound on a single generator call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Wire shape of an advice request, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct AdviceInput {
    pub task: String,
    pub phase: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "ru".into()
}

/// A validated advice request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    task: String,
    phase: PhaseLabel,
    locale: Locale,
}

impl AdviceRequest {
    /// Fails only when the task is blank; phase and locale always parse.
    pub fn new(task: impl Into<String>, phase: &str, locale: &str) -> Result<Self, ValidationError> {
        let task = task.into();
        if task.trim().is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        Ok(Self {
            task,
            phase: PhaseLabel::parse(phase),
            locale: Locale::parse(locale),
        })
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn phase(&self) -> &PhaseLabel {
        &self.phase
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl TryFrom<AdviceInput> for AdviceRequest {
    type Error = ValidationError;

    fn try_from(input: AdviceInput) -> Result<Self, Self::Error> {
        Self::new(input.task, &input.phase, &input.locale)
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    Generated,
    Fallback,
}

/// The engine's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub verdict: Verdict,
    pub reason: String,
    pub suggestion: String,
    /// Trust in the answer (0.0-1.0)
    pub confidence: f64,
    pub source: AdviceSource,
}

/// Liveness report. Built without calling the generator.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub generator_configured: bool,
    pub generator: Option<String>,
    pub fallback_strategy: FallbackStrategy,
    pub knowledge_phases: usize,
    pub checked_at: DateTime<Utc>,
}

/// Why the engine fell back.
#[derive(Error, Debug)]
enum FallbackCause {
    #[error("no generator configured")]
    NotConfigured,

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("unusable generator output: {0}")]
    Parse(#[from] ParseError),
}

pub struct AdviceEngine {
    knowledge: Arc<KnowledgeBase>,
    retriever: Retriever,
    prompts: PromptBuilder,
    generator: Option<Arc<dyn Generator>>,
    resolver: ResponseResolver,
    fallback: FallbackPolicy,
    timeout: Duration,
    retrieval_limit: usize,
}

impl AdviceEngine {
    /// Engine without a generator: every answer comes from the fallback policy.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            retriever: Retriever::new(Arc::clone(&knowledge)),
            knowledge,
            prompts: PromptBuilder::new(),
            generator: None,
            resolver: ResponseResolver::default(),
            fallback: FallbackPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            retrieval_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_resolver(mut self, resolver: ResponseResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retrieval_limit(mut self, limit: usize) -> Self {
        self.retrieval_limit = limit;
        self
    }

    /// Build from configuration. Fails on invalid settings or an unreadable
    /// knowledge file.
    ///
    /// A missing API key is not an error: the engine runs fallback-only.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let knowledge = match &config.knowledge.path {
            Some(path) => {
                info!(path = %path.display(), "loading knowledge file");
                KnowledgeBase::load(path)?
            }
            None => KnowledgeBase::builtin(),
        };

        let advice = &config.advice;
        let fallback = FallbackPolicy::new(advice.fallback_strategy)
            .with_priority(advice.verdict_priority.clone())
            .with_confidence(advice.fallback_confidence);

        let mut engine = Self::new(Arc::new(knowledge))
            .with_resolver(ResponseResolver::new(advice.invalid_verdict))
            .with_fallback(fallback)
            .with_timeout(Duration::from_secs(config.generator.timeout_secs))
            .with_retrieval_limit(advice.retrieval_limit);

        let gen_cfg = &config.generator;
        if !gen_cfg.enabled {
            debug!("generation disabled by configuration, using fallback advice");
        } else if let Some(api_key) = gen_cfg.api_key() {
            let gemini = GeminiGenerator::new(api_key, gen_cfg.model.clone())
                .with_base_url(gen_cfg.base_url.clone())
                .with_temperature(gen_cfg.temperature)
                .with_max_output_tokens(gen_cfg.max_output_tokens);
            info!(generator = gemini.name(), "generator configured");
            engine = engine.with_generator(Arc::new(gemini));
        } else {
            warn!(
                env = %gen_cfg.api_key_env,
                "API key not set, using fallback advice"
            );
        }

        Ok(engine)
    }

    /// Advise on a task. Always returns a well-formed answer.
    pub async fn advise(&self, request: &AdviceRequest) -> AdviceResponse {
        let snippets = self
            .retriever
            .search(request.task(), request.phase(), self.retrieval_limit);

        match self.generate(request, &snippets).await {
            Ok(response) => response,
            Err(cause) => {
                match cause {
                    FallbackCause::NotConfigured => debug!(%cause, "using fallback advice"),
                    _ => warn!(%cause, phase = %request.phase(), "using fallback advice"),
                }
                self.fallback.fallback(
                    &self.knowledge,
                    request.phase(),
                    request.locale(),
                    Some(request.task()),
                    &snippets,
                )
            }
        }
    }

    async fn generate(
        &self,
        request: &AdviceRequest,
        snippets: &[KnowledgeSnippet],
    ) -> Result<AdviceResponse, FallbackCause> {
        let generator = self.generator.as_ref().ok_or(FallbackCause::NotConfigured)?;

        let system = self.prompts.system_instruction(request.locale());
        let context =
            self.prompts
                .build_context(request.phase(), request.task(), snippets, request.locale());

        let raw = tokio::time::timeout(self.timeout, generator.generate(&system, &context))
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        let advice = self.resolver.resolve(&raw)?;
        debug!(verdict = %advice.verdict, generator = generator.name(), "generated advice");

        Ok(AdviceResponse {
            verdict: advice.verdict,
            reason: advice.reason,
            suggestion: advice.suggestion,
            confidence: advice.confidence,
            source: AdviceSource::Generated,
        })
    }

    /// Retrieval-only search across every known phase.
    pub fn search(&self, query: &str, limit: usize) -> Vec<KnowledgeSnippet> {
        self.retriever.search_all(query, limit)
    }

    /// Retrieval-only search within one phase.
    pub fn search_phase(&self, query: &str, phase: &PhaseLabel, limit: usize) -> Vec<KnowledgeSnippet> {
        self.retriever.search(query, phase, limit)
    }

    /// Phase metadata by key; `None` is the not-found signal.
    pub fn phase_details(&self, key: &str) -> Option<&PhaseProfile> {
        self.knowledge.get(key)
    }

    pub fn phases(&self) -> impl Iterator<Item = (Phase, &PhaseProfile)> + '_ {
        self.knowledge.phases()
    }

    pub fn generator_name(&self) -> Option<&str> {
        self.generator.as_deref().map(|g| g.name())
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            generator_configured: self.generator.is_some(),
            generator: self.generator_name().map(String::from),
            fallback_strategy: self.fallback.strategy(),
            knowledge_phases: self.knowledge.phases().count(),
            checked_at: Utc::now(),
        }
    }
}
