//! Intermediate Representation (IR) module.
//!
//! This module contains the statement kinds, the IR container and the
//! visitor dispatch used by every pass.

pub mod ir;
pub use ir::*;
pub mod stmt;
pub use stmt::*;
pub mod visit;
pub use visit::{apply, dispatch, VisitResult, Visitor};
