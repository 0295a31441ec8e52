//! # chalkmate Core
//!
//! Domain types, traits, and error definitions for the chalkmate peer-tutoring
//! classroom simulator. This crate has **zero framework dependencies**; it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The single external collaborator (a text-completion service) is defined as
//! a trait here. Implementations live in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod assessment;
pub mod bloom;
pub mod completion;
pub mod error;
pub mod persona;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use assessment::CognitiveAssessment;
pub use bloom::CognitiveLevel;
pub use completion::{CompletionRequest, CompletionService};
pub use error::{CompletionError, Error, Result, RosterError};
pub use persona::{DirectStyle, ElevateStyle, Persona, ResponseMode};
pub use turn::{Speaker, Turn};
