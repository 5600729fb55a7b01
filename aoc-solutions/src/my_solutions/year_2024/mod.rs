pub mod day_15;
pub mod day_16;
pub mod day_21;
pub mod day_24;
