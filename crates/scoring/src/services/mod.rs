pub mod aggregation;
pub mod assignment;
pub mod export;
pub mod gate;
pub mod judging;
pub mod presence;
pub mod reset;
pub mod rubric;
