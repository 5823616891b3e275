use embedded_hal::digital::InputPin;

use crate::{EncoderError, EncoderPosition, InputOwnership};


/// Identifies one of the two quadrature channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
	A,
	B,
}


/// Returns the count delta for an edge on `channel`, given both channel levels
/// sampled right after the edge.
///
/// Every edge happens while the other channel is stable, so the relative phase
/// of the two levels at that instant is enough to know the direction. Channel B
/// uses the opposite sign so both channels integrate in the same direction.
#[inline]
pub const fn edge_delta(channel: Channel, level_a: bool, level_b: bool) -> i32 {
	let same = level_a == level_b;

	match channel {
		Channel::A => if same { 1 } else { -1 },
		Channel::B => if same { -1 } else { 1 },
	}
}


/// Decodes the edges of a two-channel quadrature encoder into an [`EncoderPosition`].
///
/// The host is responsible for detecting rising and falling edges on both
/// channels and calling [`QuadDecoder::notify_edge_a`] or
/// [`QuadDecoder::notify_edge_b`] exactly once per edge, usually from the GPIO
/// interrupt handler. Ordinary code reads the angle from the shared position.
///
/// The channels are either owned ([`QuadDecoder::owned`]) and dropped with the
/// decoder, or borrowed ([`QuadDecoder::borrowed`]) and left to the caller.
pub struct QuadDecoder<'p, A, B> {
	channel_a: A,
	channel_b: B,
	position: &'p EncoderPosition,
	ownership: InputOwnership,
}

impl<'p, A, B> QuadDecoder<'p, A, B>
where
	A: InputPin,
	B: InputPin<Error = A::Error>,
{
	/// Takes ownership of both channel inputs. They are dropped with the decoder,
	/// or can be recovered with [`QuadDecoder::release`].
	pub fn owned(channel_a: A, channel_b: B, position: &'p EncoderPosition) -> Self {
		Self::with_ownership(channel_a, channel_b, position, InputOwnership::Owned)
	}

	fn with_ownership(
		channel_a: A,
		channel_b: B,
		position: &'p EncoderPosition,
		ownership: InputOwnership,
	) -> Self {
		#[cfg(feature = "defmt")]
		defmt::debug!(
			"quadrature decoder attached: {} counts/rev, wrap={}, {}",
			position.counts_per_rev(),
			position.wraps(),
			ownership,
		);

		Self {
			channel_a,
			channel_b,
			position,
			ownership,
		}
	}

	/// Handles a rising or falling edge on channel A.
	///
	/// Equal channel levels count up, unequal levels count down.
	pub fn notify_edge_a(&mut self) -> Result<(), EncoderError<A::Error>> {
		self.notify_edge(Channel::A)
	}

	/// Handles a rising or falling edge on channel B.
	///
	/// Equal channel levels count down, unequal levels count up.
	pub fn notify_edge_b(&mut self) -> Result<(), EncoderError<A::Error>> {
		self.notify_edge(Channel::B)
	}

	/// Samples both channels and applies the edge to the position.
	///
	/// If either read fails the count is left as it was.
	pub fn notify_edge(&mut self, channel: Channel) -> Result<(), EncoderError<A::Error>> {
		let level_a = self.channel_a.is_high().map_err(EncoderError::ChannelA)?;
		let level_b = self.channel_b.is_high().map_err(EncoderError::ChannelB)?;

		self.position.step(edge_delta(channel, level_a, level_b));

		Ok(())
	}
}

impl<'p, A, B> QuadDecoder<'p, A, B> {
	/// Returns the encoder angle in radians. See [`EncoderPosition::angle`].
	pub fn angle(&self) -> f32 {
		self.position.angle()
	}

	pub fn count(&self) -> i32 {
		self.position.count()
	}

	/// Resets the encoder to zero at its current physical angle.
	pub fn zero(&self) {
		self.position.zero();
	}

	/// Retrieves the position this decoder accumulates into.
	pub fn position(&self) -> &'p EncoderPosition {
		self.position
	}

	pub fn ownership(&self) -> InputOwnership {
		self.ownership
	}

	/// Returns channels A and B in a tuple, e.g. to acknowledge their interrupt flags.
	pub fn channels_mut(&mut self) -> (&mut A, &mut B) {
		(&mut self.channel_a, &mut self.channel_b)
	}

	/// Consumes the decoder and hands back both channel inputs.
	/// The accumulated count stays in the position.
	pub fn release(self) -> (A, B) {
		(self.channel_a, self.channel_b)
	}
}

impl<'p, 'c, PA, PB> QuadDecoder<'p, &'c mut PA, &'c mut PB>
where
	PA: InputPin,
	PB: InputPin<Error = PA::Error>,
{
	/// Borrows both channel inputs. The caller keeps ownership and gets them back
	/// once the decoder is dropped.
	pub fn borrowed(
		channel_a: &'c mut PA,
		channel_b: &'c mut PB,
		position: &'p EncoderPosition,
	) -> Self {
		Self::with_ownership(channel_a, channel_b, position, InputOwnership::Borrowed)
	}
}
