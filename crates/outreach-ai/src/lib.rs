//! Agentic outreach e-mail crafting.
//!
//! The crate drafts a recruiting e-mail with a hosted language model, scores it against a fixed
//! rubric, and refines it until the rubric passes or the refinement budget runs out.

pub mod config;
pub mod error;
pub mod llm;
pub mod telemetry;
pub mod workflows;
