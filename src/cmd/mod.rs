pub mod audit;
pub mod finger;
