//! A self-graded DOM quiz: question model, grading, and the session that walks a
//! learner through a randomly drawn set of questions.

pub mod chat;
pub mod config;
pub mod quiz;
pub mod store;
