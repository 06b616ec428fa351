pub mod gravity;
pub mod matching;
pub mod rapier;
