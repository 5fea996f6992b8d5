//! # ffagent-retrieval
//!
//! Per-question context assembly. The assembler runs entity detection
//! and classification, gathers similar successful patterns, cautionary
//! error patterns and relevant schema hints, and derives domain hints.
//! Retrieval never fails a request: a failed source contributes an
//! empty section and the rest of the context stands.

pub mod assembler;
pub mod hints;

pub use assembler::ContextAssembler;
