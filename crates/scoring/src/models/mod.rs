pub mod category;
pub mod contestant;
pub mod judge;
pub mod rubric;
pub mod score;
pub mod status;
pub mod system;

pub use category::{Category, CategoryInfo};
pub use contestant::{Contestant, ContestantId};
pub use judge::{JudgeId, JudgeKey, JudgeProfile};
pub use rubric::{Criterion, Rubric};
pub use score::{ScoreDetails, ScoreRecord, ScoreSnapshot};
pub use status::{StatusRecord, StatusSnapshot};
pub use system::{LockScope, LockState};
