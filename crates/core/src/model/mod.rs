mod app_state;
mod contest;
mod ids;
mod problem;
mod shared;
mod submission;
mod user_list;

pub use app_state::{AppState, AppStateDraft};
pub use contest::Contest;
pub use ids::{ContestId, ParseIdError, ProblemId};
pub use problem::{Problem, ProblemRef, Status, sort_catalog};
pub use shared::SharedProblem;
pub use submission::{Submission, Verdict};
pub use user_list::{UserList, UserListError};
