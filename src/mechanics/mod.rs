pub mod scale;
pub mod sequence;
pub mod series;
pub mod stepwise;

pub use scale::*;
pub use sequence::*;
pub use series::*;
pub use stepwise::*;
