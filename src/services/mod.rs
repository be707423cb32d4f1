pub mod razorpay;
pub mod signature;

pub use razorpay::RazorpayClient;
