/// The resolution of a typical detented knob in a pulses per revolution metric.
pub const DEFAULT_PPR: u32 = 360;
/// The number of counts in a full revolution when both edges of both channels
/// are decoded.
pub const DEFAULT_COUNTS_PER_REV: u32 = DEFAULT_PPR * 4;


/// Provides the configuration an [`EncoderPosition`](crate::EncoderPosition) is built from.
/// Options can be chained, and every method is usable in a `static` initializer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderOptions {
	counts_per_rev: u32,
	wrap_angle: bool,
}

impl EncoderOptions {
	/// Creates options for an encoder with the given resolution.
	/// Angle wrapping is disabled.
	pub const fn new(counts_per_rev: u32) -> Self {
		Self {
			counts_per_rev,
			wrap_angle: false,
		}
	}

	/// Sets the amount of counts in a full mechanical revolution.
	///
	/// Default is [`DEFAULT_COUNTS_PER_REV`].
	pub const fn with_counts_per_rev(mut self, counts_per_rev: u32) -> Self {
		self.counts_per_rev = counts_per_rev;
		self
	}

	/// Sets whether the reported angle is wrapped into a single turn.
	///
	/// Default is `false`.
	pub const fn with_wrap_angle(mut self, wrap_angle: bool) -> Self {
		self.wrap_angle = wrap_angle;
		self
	}

	pub const fn counts_per_rev(&self) -> u32 {
		self.counts_per_rev
	}

	pub const fn wrap_angle(&self) -> bool {
		self.wrap_angle
	}
}

impl Default for EncoderOptions {
	fn default() -> Self {
		Self::new(DEFAULT_COUNTS_PER_REV)
	}
}


/// Determines who is responsible for the channel inputs of a decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputOwnership {
	/// The caller keeps the inputs; the decoder only borrows them.
	Borrowed,
	/// The decoder owns the inputs and releases them when dropped.
	Owned,
}
