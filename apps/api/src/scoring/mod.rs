// Resume scoring: extraction, five parallel section scores, weighted aggregation.
// All model calls go through sections::TaskContext.

pub mod aggregate;
pub mod graph;
pub mod handlers;
pub mod insights;
