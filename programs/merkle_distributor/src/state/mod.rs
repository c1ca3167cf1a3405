pub mod bitmap_state;
pub mod distributor_state;

pub use bitmap_state::*;
pub use distributor_state::*;
