pub mod day_8;
pub mod day_11;
pub mod day_14;
pub mod day_17;
pub mod day_19;
pub mod day_21;
pub mod day_22;
pub mod day_23;
pub mod day_24;
