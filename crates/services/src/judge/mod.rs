//! Remote judge collaborators.

mod codeforces;
mod wire;

pub use codeforces::CodeforcesClient;

use async_trait::async_trait;
use tracker_core::model::{Contest, Problem, SharedProblem, Submission};

use crate::error::JudgeError;

/// Fetch operations the dashboard needs from the judge.
#[async_trait]
pub trait JudgeApi: Send + Sync {
    /// Full problem catalog, with solved counts joined in.
    async fn fetch_problems(&self) -> Result<Vec<Problem>, JudgeError>;

    /// Full contest catalog.
    async fn fetch_contests(&self) -> Result<Vec<Contest>, JudgeError>;

    /// Submission history of one handle, newest first.
    async fn fetch_user_submissions(&self, handle: &str) -> Result<Vec<Submission>, JudgeError>;

    /// Table of problems whose statement is mirrored in other contests.
    async fn fetch_shared_problems(&self) -> Result<Vec<SharedProblem>, JudgeError>;
}
