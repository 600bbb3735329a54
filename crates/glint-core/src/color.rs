//! Display colour depth.

use std::fmt;

use thiserror::Error;

/// Bits per pixel of the native colour type.
///
/// Determines how many bytes one pixel occupies in draw buffers, which in
/// turn sizes the largest fixed reservation the runtime makes at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorDepth {
    /// Monochrome. Stored one pixel per byte.
    One,
    /// RGB332.
    Eight,
    /// RGB565.
    Sixteen,
    /// ARGB8888.
    ThirtyTwo,
}

/// A bit depth that the toolkit has no colour type for.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unsupported colour depth {bits} (expected 1, 8, 16 or 32)")]
pub struct ColorDepthError {
    /// The rejected depth.
    pub bits: u8,
}

impl ColorDepth {
    /// Bytes one pixel occupies in a draw buffer.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::One | Self::Eight => 1,
            Self::Sixteen => 2,
            Self::ThirtyTwo => 4,
        }
    }

    /// The depth in bits.
    pub fn bits(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::ThirtyTwo => 32,
        }
    }
}

impl TryFrom<u8> for ColorDepth {
    type Error = ColorDepthError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Self::One),
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            32 => Ok(Self::ThirtyTwo),
            _ => Err(ColorDepthError { bits }),
        }
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bpp", self.bits())
    }
}
