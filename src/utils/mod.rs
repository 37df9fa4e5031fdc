pub mod gpa;
pub mod render;
pub mod storage;
