#![forbid(unsafe_code)]

//! Inline card-markup parser + styled token model.
//!
//! Design goals:
//! - markup rendering must never fail on malformed input (degrade, don't raise)
//! - deterministic, testable outputs (token streams are plain data)
//! - no drawing here: rasterization lives in `cardstock-render`

pub mod error;
pub mod markup;
pub mod theme;
pub mod token;

pub use error::{Error, Result};
pub use markup::{explode, parse};
pub use theme::{Palette, Rgba};
pub use token::{StyleState, Token};
