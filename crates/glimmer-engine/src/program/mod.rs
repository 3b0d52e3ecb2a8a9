//! Program compilation: fragment source + fixed vertex stage → linked program.
//!
//! Uniform and attribute names are a fixed contract (`time`, `image`,
//! `texture0`..`texture5`, `position`); nothing is remapped.

mod compiler;

pub use compiler::{ProgramCompiler, DEFAULT_VERTEX_SHADER, POSITION_ATTRIBUTE};
