//! Pipeline stages for one slide.
//!
//! Each submodule implements exactly one step. Keeping stages separate makes
//! each independently testable and keeps the orchestration in
//! [`crate::generate`] down to wiring and fallback decisions.
//!
//! ## Data Flow
//!
//! ```text
//!            ┌── content ──────────────────────────┐   ┌── code ───────────────────────────┐
//! prompts ──▶│ llm ──▶ postprocess  (or fallback)  │──▶│ llm ──▶ extract  (or templates)   │
//!            └─────────────────────────────────────┘   └───────────────────────────────────┘
//! ```
//!
//! 1. [`llm`]        : the [`llm::GenerationClient`] boundary, timeouts and
//!    echo stripping; the only stage with I/O
//! 2. [`postprocess`]: deterministic cleanup of content Markdown
//! 3. [`extract`]    : find the component in a code completion and check it

pub mod extract;
pub mod llm;
pub mod postprocess;
