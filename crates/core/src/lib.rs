//! Core logic for the Sozo lesson runner: the lesson data model, the lesson
//! catalog, the per-session stepper and the response generators it grades
//! learner answers with.

pub mod catalog;
pub mod conversation;
pub mod generator;
pub mod lesson;
pub mod llm_client;
pub mod scripted;
pub mod stepper;
