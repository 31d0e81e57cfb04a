#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod error;
pub mod cards;
pub mod pool;
pub mod rules;
pub mod steps;
pub mod solve;

pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::cards::{display_order, format_group, parse_card, parse_cards, Card};
pub use crate::error::{ErrorKind, SolveError};
pub use crate::pool::CardMultiset;
pub use crate::rules::{classify_group, is_valid_group, is_valid_run, is_valid_set, GroupKind};
pub use crate::solve::{
    solve, validate_group, CardDto, GroupReport, SolveRequest, SolveResponse, StepDto,
};
pub use crate::solver::{HandOutcome, SearchLimits, Solver};
pub use crate::steps::{plan_steps, Step, StepKind};
pub use crate::types::Suit;
