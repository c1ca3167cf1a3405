pub mod create_distributor;
pub mod accept_terms;
pub mod claim;
pub mod emergency_withdraw;

pub use create_distributor::*;
pub use accept_terms::*;
pub use claim::*;
pub use emergency_withdraw::*;
