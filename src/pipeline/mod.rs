//! Generation pipeline: the controller state machine and its state values.
//!
//! # Architecture
//!
//! ```text
//! GenerationInput
//!        │
//!        ▼
//! GenerationController::submit()
//!        │
//!        ├─ validate()              → Validating
//!        ├─ compose()               → Composing
//!        ├─ client.generate().await → AwaitingResponse
//!        └─ ContentFilter::filter() → Filtering
//!              │
//!              ▼
//!        Succeeded(GenerationResult) | Failed(message)
//!
//! state changes ──▶ mpsc::UnboundedSender<ControllerState> (presentation layer)
//! ```

pub mod controller;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{GenerationController, PipelineError, SubmitOutcome};
pub use state::{estimate_tokens, ControllerState, GenerationResult, StateKind};
