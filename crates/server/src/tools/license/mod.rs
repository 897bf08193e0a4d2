//! License and checkout tools.

pub mod activate;
pub mod checkout;
pub mod status;

pub use activate::{LicenseActivateParams, activate_impl};
pub use checkout::{CheckoutConfirmParams, CheckoutStartParams, confirm_impl, start_impl};
pub use status::status_impl;
