use std::fmt;

/// Lifecycle of one crawl
///
/// `Idle` until the first start, `Running` while workers pull tasks, `Draining` once the queue is empty with
/// nothing active and the stop flag is raised, `Stopped` after every worker
/// has been joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    #[default]
    Idle,
    Running,
    Draining,
    Stopped,
}

impl CrawlPhase {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Stopped)
                | (Self::Stopped, Self::Running)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
