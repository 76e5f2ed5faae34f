//! SigPad Render Library
//!
//! Raster implementation of the SigPad drawing surface, used for the result
//! image and for hosts without a native canvas.

mod raster;

pub use raster::RasterSurface;

/// Signature widget backed by CPU raster surfaces.
pub type RasterSignature = sigpad_core::SignatureWidget<RasterSurface>;
