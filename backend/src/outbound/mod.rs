//! Outbound adapters for external collaborators.

pub mod gemini;
pub mod qr_image;
