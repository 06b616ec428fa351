pub mod score;
pub mod spawn;
