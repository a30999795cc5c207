//! The conversation engine — the heart of Vitae.
//!
//! Every visitor turn follows the same cycle:
//!
//! 1. **Rebuild** the system prompt from the persona and the knowledge base
//! 2. **Replay** the prior transcript (role + text only) plus the new message
//! 3. **Call the model** with both tool definitions attached
//! 4. **If tool calls**: execute them, append results, loop back to step 3
//! 5. **If text**: run the don't-know check, then return the answer
//!
//! The loop is bounded; an adversarial model that keeps requesting tools
//! ends the turn with `LoopBoundExceeded` instead of spinning forever.

pub mod engine;

pub use engine::{Assistant, FALLBACK_ANSWER, is_dont_know};

#[cfg(test)]
pub(crate) mod test_helpers;
