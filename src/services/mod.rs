// src/services/mod.rs

pub mod eligibility;
pub mod grading;
pub mod progress;
pub mod shuffler;
