// Readability analysis: text extraction from uploads, surface-statistics
// scoring, and the per-user history store. Scoring is pure; extraction and
// persistence surface their failures per request with no retries.

pub mod extract;
pub mod handlers;
pub mod history;
pub mod scoring;
