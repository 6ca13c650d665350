// src/models/mod.rs

pub mod exam;
pub mod exam_record;
pub mod question;
pub mod session;
pub mod student;
