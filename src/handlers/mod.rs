pub mod fallback;
pub mod health;
pub mod orders;
pub mod payments;

pub use fallback::*;
pub use health::*;
pub use orders::*;
pub use payments::*;

use std::sync::Arc;

use crate::{config::Config, services::RazorpayClient};

#[derive(Clone)]
pub struct AppState {
    pub razorpay: Arc<RazorpayClient>,
    pub settings: Arc<Config>,
}
