//! # frontc
//!
//! Front-end infrastructure for a small C-family pedagogical compiler:
//! arena allocation, string interning, file loading, source location
//! bookkeeping, lexing, and structured diagnostics.
//!
//! The modules are listed here in dependency order (leaves first), which
//! is also the order data flows through them: a path is handed to
//! [`file_manager`], the loaded bytes are registered with
//! [`source_manager`] to get a compact location space, [`lexer`] scans
//! that space producing tokens whose identifier/literal spellings are
//! deduplicated by [`interner`] (itself backed by [`arena`]), and
//! anything that goes wrong along the way is reported through
//! [`diagnostics`].
//!
//! A parser, type checker, and everything after it are deliberately out
//! of scope — this crate only gets source text into a stream of located,
//! classified tokens.

pub mod arena;
pub mod diagnostics;
pub mod file_manager;
pub mod interner;
pub mod lexer;
pub mod source_manager;
