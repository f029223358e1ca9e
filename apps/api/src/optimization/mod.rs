// Resume optimization: optional extraction, five parallel section rewrites, merge.

pub mod graph;
pub mod handlers;
pub mod merge;
