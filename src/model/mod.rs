pub mod records;
pub mod review;
pub mod supply_chain;
