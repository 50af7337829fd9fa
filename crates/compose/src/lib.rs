//! The turn-context composition engine — the heart of Turnstone.
//!
//! Assembling the effective system context for one conversational turn is a
//! four-step pipeline:
//!
//! 1. **Collect** — resolve each requested provider name in order, with
//!    per-provider failure isolation
//! 2. **Compose** — merge prompt fragments under one of three mutually
//!    exclusive policies
//! 3. **Unify** — install a single effective provider: pass-through,
//!    synthetic composite, or none
//! 4. **Assemble** — apply the extra-system-prompt override, publish the
//!    leading system message, and emit one trace record
//!
//! Everything runs strictly sequentially within a turn, so fragment and
//! tool order are deterministic and observable contracts.

pub mod assembler;
pub mod collector;
pub mod composer;
pub mod render;
pub mod turn;
pub mod unifier;

pub use assembler::{EXTRA_SYSTEM_PROMPT_TAG, TurnAssembler, TurnInput};
pub use collector::collect;
pub use composer::{CompositionResult, compose};
pub use render::{BasePromptRenderer, PromptManager, RenderContext};
pub use turn::TurnState;
pub use unifier::{EffectiveProvider, unify};
