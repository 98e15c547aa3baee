//! courseai-core: answer scoring, priority queues, and quiz grading.
//!
//! This crate holds the scoring engine that grades free-text quiz answers,
//! the priority queue that orders background work, and the quiz model,
//! reports and configuration built on top of them.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod queue;
pub mod report;
pub mod scheduler;
pub mod scoring;
pub mod similarity;
pub mod statistics;
