pub mod categories;
pub mod staples;
pub mod unauthorized;
pub mod units;
