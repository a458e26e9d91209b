// src/models/mod.rs

pub mod component;
pub mod course;
pub mod course_module;
pub mod progress;
pub mod question;
pub mod section;
pub mod submission;
