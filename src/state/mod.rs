//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TaskState`: Tracks one crawl task (queued, active, completed, failed)
//! - `CrawlPhase`: Tracks the spider as a whole (idle, running, draining, stopped)

mod crawl_phase;
mod task_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use task_state::TaskState;
