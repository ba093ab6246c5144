//! Sentinel engine brokerage
//!
//! The engine is an external, already-sandboxed process. This module owns
//! everything the gateway does around it:
//!
//! 1. **Workspace** (`workspace.rs`): a uniquely named temporary source file
//!    that is removed exactly once, on every exit path.
//! 2. **Invoker** (`invoker.rs`): runs `<engine> <source-file>` under a
//!    wall-clock limit and captures both output streams.
//! 3. **Interpreter** (`interpreter.rs`): turns the engine's line-oriented
//!    output into a `Verdict` or a classified error.

pub mod interpreter;
pub mod invoker;
pub mod workspace;

pub use interpreter::interpret;
pub use invoker::{EngineInvoker, ExecutionOutcome};
pub use workspace::Workspace;
