pub mod audit;
pub mod serve;
