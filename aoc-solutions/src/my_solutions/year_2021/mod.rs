pub mod day_1;
pub mod day_6;
pub mod day_15;
pub mod day_17;
pub mod day_18;
pub mod day_19;
pub mod day_20;
pub mod day_22;
pub mod day_23;
pub mod day_24;
