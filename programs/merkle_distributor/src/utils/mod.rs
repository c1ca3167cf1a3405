pub mod merkle;
pub mod pda;
pub mod terms;
pub mod token;

pub use merkle::*;
pub use terms::*;
pub use token::*;
