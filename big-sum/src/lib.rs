//! Arbitrary-precision summation of decimal, hex, octal and binary numbers
//!
//! Integers are summed exactly. Decimal fractions are summed exactly too: the
//! fractional digits are kept as a scaled big integer next to the whole part,
//! so no binary floating point rounding ever happens.
//!
//! ```
//! use big_sum::{make_pretty, sum};
//!
//! assert_eq!(sum(["1,000", "0x10", "2.25"]).unwrap(), "1018.25");
//! assert_eq!(make_pretty("-1234567.891"), "-1,234,567.891");
//! ```

pub mod cli;
mod pretty;
mod sum;

pub use cli::{Args, BigSumError, run};
pub use pretty::make_pretty;
pub use sum::{Accumulator, SumError, sum};
