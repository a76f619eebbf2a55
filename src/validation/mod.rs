pub mod diff;
pub mod verdict;
