// src/repositories/mod.rs

pub mod exams;
pub mod results;
pub mod sessions;
pub mod students;
