//! Browser-side collaborators: the REST client and the payment overlay.

pub(crate) mod api;
pub(crate) mod razorpay;
