pub mod optimization;
pub mod resume;
pub mod scoring;
