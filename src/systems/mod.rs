pub mod sdk;
pub mod board;
pub mod cost;
pub mod progress;
pub mod summation;
pub mod upgrade;
