pub mod audit;
pub mod retry;
pub mod search;
