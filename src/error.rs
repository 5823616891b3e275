//! Error types for the quadrature decoder.

use core::fmt;

/// Errors that can occur while sampling the encoder channels.
///
/// Decoding itself cannot fail; the only fault is the HAL refusing to report
/// a pin level. The count is left untouched when this happens.
#[derive(Debug, PartialEq)]
pub enum EncoderError<E> {
	/// Reading channel A failed.
	ChannelA(E),

	/// Reading channel B failed.
	ChannelB(E),
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			EncoderError::ChannelA(e) => write!(f, "channel A read error: {:?}", e),
			EncoderError::ChannelB(e) => write!(f, "channel B read error: {:?}", e),
		}
	}
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
	fn format(&self, f: defmt::Formatter) {
		match self {
			EncoderError::ChannelA(e) => defmt::write!(f, "channel A read error: {}", e),
			EncoderError::ChannelB(e) => defmt::write!(f, "channel B read error: {}", e),
		}
	}
}
