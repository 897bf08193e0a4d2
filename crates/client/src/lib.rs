//! Client code for mcp-feedclip.
//!
//! This crate provides post extraction from feed markup, the capture
//! session guard, and the licensing backend client shared by the server.

pub mod capture;
pub mod extract;
pub mod license;

pub use capture::CaptureSession;

pub use extract::{FeedProfile, extract_post};

pub use license::{
    CheckoutSession, LicenseClient, LicenseConfig, LicenseError, SessionDetails, VerifyResponse, is_well_formed,
    normalize_input,
};
