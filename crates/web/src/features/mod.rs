pub mod boards;
pub mod judging;
pub mod presence;
pub mod system;
