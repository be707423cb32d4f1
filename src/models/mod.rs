pub mod order;
pub mod payment;
pub mod response;

pub use order::*;
pub use payment::*;
pub use response::*;
