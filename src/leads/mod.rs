//! # Lead Capture
//!
//! Hands the raw form record to a third-party form endpoint and reports back
//! either acceptance or per-field validation messages.

pub mod client;
pub mod formspree;

pub use client::{FieldError, LeadCapture, LeadError, LeadOutcome};
pub use formspree::FormspreeClient;
