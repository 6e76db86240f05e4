//! Generation controller: drives validate → compose → generate → filter.
//!
//! [`GenerationController`] owns the single [`ControllerState`] and is the only
//! thing that mutates it.  Each accepted submission opens a new *cycle*
//! identified by a sequence number; every state change checks that its cycle
//! is still current, so a response that arrives after the cycle was abandoned
//! (and possibly after a newer cycle started) is discarded instead of
//! overwriting newer state.  Dropping a pending `submit` future (a caller
//! timeout, a lost `select!` branch, an aborted task) abandons its cycle.
//!
//! # Cycle flow
//!
//! ```text
//! submit(input)
//!   ├─ busy?            → Rejected (no state change)
//!   ├─ Validating       → errors? Failed("<joined messages>")
//!   ├─ Composing        → unknown template? Failed(..)
//!   ├─ AwaitingResponse → client.generate().await   (only suspension point)
//!   │                     error? Failed("<upstream message>")
//!   └─ Filtering        → pass: Succeeded(result)
//!                         reject: Failed("Output failed content filtering.")
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::client::{GenerationClient, GenerationError};
use crate::filter::ContentFilter;
use crate::prompt::{compose, TemplateRegistry, UnknownTemplateError};
use crate::validation::{join_messages, validate, GenerationInput, ValidationError};

use super::state::{ControllerState, GenerationResult};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Every way a cycle can end in `Failed`.
///
/// `Display` is the message stored in [`ControllerState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Input problems, all of them, joined into one line.
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Internal misconfiguration: the input named a template that does not exist.
    #[error(transparent)]
    UnknownTemplate(#[from] UnknownTemplateError),

    /// Transport, timeout or response-shape failure from the client.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Generation succeeded but the text failed the content screen.
    #[error("Output failed content filtering.")]
    ContentRejected,

    /// The caller gave up on a pending response.
    #[error("Generation was abandoned before a response arrived.")]
    Abandoned,
}

// ---------------------------------------------------------------------------
// SubmitOutcome
// ---------------------------------------------------------------------------

/// What happened to a call to [`GenerationController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The cycle ran to a terminal state (`Succeeded` or `Failed`).
    Completed(ControllerState),
    /// Another cycle was in flight; this submission was ignored.
    Rejected,
    /// The cycle was abandoned while pending; its late result was discarded.
    Superseded,
}

// ---------------------------------------------------------------------------
// GenerationController
// ---------------------------------------------------------------------------

struct Inner {
    state: ControllerState,
    cycle: u64,
}

/// Sequences one generation cycle at a time.
///
/// Share it as `Arc<GenerationController>`; all methods take `&self`.
///
/// ```rust,no_run
/// use lesson_generator::client::MockedClient;
/// use lesson_generator::filter::ContentFilter;
/// use lesson_generator::pipeline::GenerationController;
/// use lesson_generator::prompt::TemplateRegistry;
/// use lesson_generator::validation::GenerationInput;
/// use std::sync::Arc;
///
/// # async fn example() {
/// let controller = GenerationController::new(
///     TemplateRegistry::builtin(),
///     Arc::new(MockedClient::default()),
///     ContentFilter::default(),
/// );
/// let input = GenerationInput {
///     topic: "Cells".into(),
///     level: "Middle School".into(),
///     ..GenerationInput::default()
/// };
/// let outcome = controller.submit(&input).await;
/// # }
/// ```
pub struct GenerationController {
    registry: TemplateRegistry,
    client: Arc<dyn GenerationClient>,
    filter: ContentFilter,
    inner: Mutex<Inner>,
    listener: Option<mpsc::UnboundedSender<ControllerState>>,
}

impl GenerationController {
    pub fn new(
        registry: TemplateRegistry,
        client: Arc<dyn GenerationClient>,
        filter: ContentFilter,
    ) -> Self {
        Self {
            registry,
            client,
            filter,
            inner: Mutex::new(Inner {
                state: ControllerState::Idle,
                cycle: 0,
            }),
            listener: None,
        }
    }

    /// Send every subsequent state change, in order, to `tx`.
    pub fn with_listener(mut self, tx: mpsc::UnboundedSender<ControllerState>) -> Self {
        self.listener = Some(tx);
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Snapshot of the current state.
    pub fn state(&self) -> ControllerState {
        self.lock().state.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().state.is_busy()
    }

    /// The filtered text of a `Succeeded` state, for export.
    pub fn exportable_text(&self) -> Option<String> {
        match &self.lock().state {
            ControllerState::Succeeded(result) => result.filtered_text.clone(),
            _ => None,
        }
    }

    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Run one full cycle for `input`.
    ///
    /// Returns [`SubmitOutcome::Rejected`] without touching state if a cycle
    /// is already in flight.
    pub async fn submit(&self, input: &GenerationInput) -> SubmitOutcome {
        let Some(cycle) = self.begin_cycle() else {
            log::debug!("controller: submit ignored, a generation is already in flight");
            return SubmitOutcome::Rejected;
        };
        let _guard = CycleGuard {
            controller: self,
            cycle,
        };

        // ── Validating ───────────────────────────────────────────────────
        let errors = validate(input);
        if !errors.is_empty() {
            return self.fail(cycle, PipelineError::Validation(errors));
        }

        // ── Composing ────────────────────────────────────────────────────
        if !self.advance(cycle, ControllerState::Composing) {
            return SubmitOutcome::Superseded;
        }
        let template = match self.registry.resolve(&input.template_id) {
            Ok(template) => template,
            Err(e) => return self.fail(cycle, e.into()),
        };
        let request = compose(input, template);

        // ── AwaitingResponse ─────────────────────────────────────────────
        if !self.advance(cycle, ControllerState::AwaitingResponse) {
            return SubmitOutcome::Superseded;
        }
        log::debug!(
            "controller: cycle {cycle} sending {} prompt chars via {} client",
            request.prompt_text().chars().count(),
            self.client.name()
        );
        let started = Instant::now();
        let response = self.client.generate(&request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let raw_text = match response {
            Ok(text) => text,
            Err(e) => return self.fail(cycle, e.into()),
        };

        // ── Filtering ────────────────────────────────────────────────────
        if !self.advance(cycle, ControllerState::Filtering) {
            log::warn!("controller: discarding late response for abandoned cycle {cycle}");
            return SubmitOutcome::Superseded;
        }
        match self.filter.filter(&raw_text) {
            Some(filtered) => {
                let result = GenerationResult::new(raw_text, Some(filtered), elapsed_ms);
                log::info!(
                    "controller: cycle {cycle} succeeded in {} ms (~{} tokens)",
                    result.elapsed_ms,
                    result.token_estimate
                );
                self.finish(cycle, ControllerState::Succeeded(result))
            }
            None => self.fail(cycle, PipelineError::ContentRejected),
        }
    }

    /// A user edit clears a previous failure back to `Idle`.
    pub fn notify_edit(&self) {
        let mut inner = self.lock();
        if matches!(inner.state, ControllerState::Failed(_)) {
            self.transition(&mut inner, ControllerState::Idle);
        }
    }

    /// Give up on the in-flight cycle.
    ///
    /// Moves to `Failed` immediately; whatever the pending client call later
    /// returns is discarded.  Returns `false` when nothing was in flight.
    pub fn abandon(&self) -> bool {
        let mut inner = self.lock();
        let cycle = inner.cycle;
        self.abandon_locked(&mut inner, cycle)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim a new cycle and enter `Validating`, or `None` if busy.
    fn begin_cycle(&self) -> Option<u64> {
        let mut inner = self.lock();
        if inner.state.is_busy() {
            return None;
        }
        if inner.state.is_terminal() {
            self.transition(&mut inner, ControllerState::Idle);
        }
        inner.cycle += 1;
        self.transition(&mut inner, ControllerState::Validating);
        Some(inner.cycle)
    }

    /// Move to `next` if `cycle` is still current.
    fn advance(&self, cycle: u64, next: ControllerState) -> bool {
        let mut inner = self.lock();
        if inner.cycle != cycle {
            return false;
        }
        self.transition(&mut inner, next);
        true
    }

    fn finish(&self, cycle: u64, terminal: ControllerState) -> SubmitOutcome {
        if self.advance(cycle, terminal.clone()) {
            SubmitOutcome::Completed(terminal)
        } else {
            SubmitOutcome::Superseded
        }
    }

    fn fail(&self, cycle: u64, error: PipelineError) -> SubmitOutcome {
        match &error {
            PipelineError::Validation(_) | PipelineError::ContentRejected => {
                log::warn!("controller: cycle {cycle} failed: {error}");
            }
            _ => log::error!("controller: cycle {cycle} failed: {error}"),
        }
        self.finish(cycle, ControllerState::Failed(error.to_string()))
    }

    /// Fail `cycle` as abandoned if it is still current and in flight.
    fn abandon_locked(&self, inner: &mut Inner, cycle: u64) -> bool {
        if inner.cycle != cycle || !inner.state.is_busy() {
            return false;
        }
        log::warn!("controller: abandoning cycle {cycle}");
        inner.cycle += 1;
        self.transition(
            inner,
            ControllerState::Failed(PipelineError::Abandoned.to_string()),
        );
        true
    }

    fn transition(&self, inner: &mut Inner, next: ControllerState) {
        log::debug!("controller: {} -> {}", inner.state.label(), next.label());
        inner.state = next.clone();
        if let Some(tx) = &self.listener {
            // A dropped receiver just means nobody is watching.
            let _ = tx.send(next);
        }
    }
}

// ---------------------------------------------------------------------------
// CycleGuard
// ---------------------------------------------------------------------------

/// Lives for the body of one `submit`.  A cycle that finished or was
/// superseded is left alone; one still in flight when the future is dropped
/// is abandoned.
struct CycleGuard<'a> {
    controller: &'a GenerationController,
    cycle: u64,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.controller.lock();
        if self.controller.abandon_locked(&mut inner, self.cycle) {
            log::debug!("controller: submit for cycle {} dropped while pending", self.cycle);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
