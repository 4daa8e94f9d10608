//! The host-facing half of the engine: value/array/constant storage
//! per VM, engine and library lifecycle, configuration verbs, and
//! optional multi-thread mutexing.
//!
//! Lexing and parsing turn source text into an expression tree; this
//! crate is everything a host touches around that — creating engines
//! and VMs, installing callbacks, reading and writing values, and
//! observing compile errors. Turning a parsed tree into bytecode and
//! running it, and wiring a lexer/parser into a VM, belong to the
//! driver built on top of this crate.

pub mod config;
mod constant;
mod engine;
mod error;
mod host;
mod mutex;
mod vfs;
mod vm;

pub use config::{EngineVerb, ErrorConsumer, GlyphConfig, LibraryVerb};
pub use constant::{ConstantRegistry, Expander};
pub use engine::{Engine, Library, VmId};
pub use error::EngineResult;
pub use host::{EngineHost, ObjectTable};
pub use mutex::{Guarded, ThreadLevel, Ticket};
pub use vfs::{NullVfs, Vfs};
pub use vm::{ForeignFunction, OutputConsumer, Vm};
