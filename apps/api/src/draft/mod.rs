// Result Normalization Layer
// Turns heterogeneous model output (fenced JSON, prose-wrapped JSON, plain
// glyphed lines, decoded values) into one canonical shape per task kind, or
// nothing. Pure and synchronous; every failure mode degrades to
// `json: None` with the raw text preserved.

pub mod canonical;
pub mod classify;
pub mod extract;
pub mod fallback;
pub mod fences;
pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod render;
