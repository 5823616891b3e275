use core::cell::Cell;
use core::f32::consts::TAU;

use critical_section::Mutex;

use crate::EncoderOptions;


/// The shared count of a quadrature encoder and its conversion to an angle.
///
/// This is the only state touched both from interrupt context (through a
/// [`QuadDecoder`](crate::QuadDecoder)) and from ordinary code. Every access
/// to the count happens inside a critical section that spans a single load
/// or store, so it is safe to keep one in a `static` and read it at any time.
///
/// ```
/// use pico_quad_encoder::{EncoderOptions, EncoderPosition};
///
/// static KNOB: EncoderPosition = EncoderPosition::new(
/// 	EncoderOptions::new(1440).with_wrap_angle(true),
/// );
///
/// assert_eq!(KNOB.angle(), 0.0);
/// ```
pub struct EncoderPosition {
	count: Mutex<Cell<i32>>,
	counts_per_rev: u32,
	rad_per_count: f32,
	wrap_angle: bool,
}

impl EncoderPosition {
	/// Creates a zeroed position for the given options.
	///
	/// # Panics
	/// If the resolution is zero or does not fit in an `i32`. In a `static`
	/// initializer this is reported at compile time.
	pub const fn new(options: EncoderOptions) -> Self {
		let counts_per_rev = options.counts_per_rev();

		assert!(counts_per_rev > 0, "counts per revolution must be nonzero");
		assert!(counts_per_rev <= i32::MAX as u32, "counts per revolution must fit in an i32");

		Self {
			count: Mutex::new(Cell::new(0)),
			counts_per_rev,
			rad_per_count: TAU / counts_per_rev as f32,
			wrap_angle: options.wrap_angle(),
		}
	}

	/// Returns a snapshot of the accumulated count.
	///
	/// Note: Briefly suspends interrupts.
	pub fn count(&self) -> i32 {
		critical_section::with(|cs| self.count.borrow(cs).get())
	}

	/// Returns the encoder angle in radians.
	///
	/// When wrapping is enabled the result lies in `(-π, +π]`, otherwise it grows
	/// without bound across turns.
	///
	/// Note: Briefly suspends interrupts.
	pub fn angle(&self) -> f32 {
		let count = self.count();

		if self.wrap_angle {
			wrap_count(count, self.counts_per_rev) as f32 * self.rad_per_count
		}
		else {
			count as f32 * self.rad_per_count
		}
	}

	/// Resets the encoder to zero at its current physical angle.
	///
	/// Note: Briefly suspends interrupts.
	pub fn zero(&self) {
		critical_section::with(|cs| self.count.borrow(cs).set(0));

		#[cfg(feature = "defmt")]
		defmt::trace!("encoder zeroed");
	}

	/// Adds a decoded edge to the count.
	///
	/// Safe to call from an interrupt handler, even one that can be preempted by
	/// another edge handler: the read-add-store runs inside its own critical section.
	#[inline]
	pub(crate) fn step(&self, delta: i32) {
		critical_section::with(|cs| {
			let count = self.count.borrow(cs);
			count.set(count.get().wrapping_add(delta));
		});
	}

	pub fn counts_per_rev(&self) -> u32 {
		self.counts_per_rev
	}

	/// Angular resolution in radians per count.
	pub fn rad_per_count(&self) -> f32 {
		self.rad_per_count
	}

	/// Whether [`EncoderPosition::angle`] wraps into a single turn.
	pub fn wraps(&self) -> bool {
		self.wrap_angle
	}
}


/// Reduces a count modulo one revolution into `(-cpr/2, cpr/2]`.
///
/// Done on the integer count rather than the float angle so that exact half
/// turns always land on `+π`.
fn wrap_count(count: i32, counts_per_rev: u32) -> i32 {
	let cpr = counts_per_rev as i64;
	let rem = (count as i64).rem_euclid(cpr);

	let wrapped = if 2 * rem > cpr { rem - cpr } else { rem };

	wrapped as i32
}


#[cfg(test)]
mod tests {
	use super::*;
	use core::f32::consts::{FRAC_PI_2, PI};

	const TOLERANCE: f32 = 1e-6;

	fn assert_close(actual: f32, expected: f32) {
		assert!(
			(actual - expected).abs() < TOLERANCE * expected.abs().max(1.0),
			"expected {expected}, got {actual}",
		);
	}

	fn position_at(count: i32, options: EncoderOptions) -> EncoderPosition {
		let position = EncoderPosition::new(options);
		position.step(count);
		position
	}

	#[test]
	fn resolution_is_computed_once() {
		let position = EncoderPosition::new(EncoderOptions::new(4));
		assert_eq!(position.counts_per_rev(), 4);
		assert_close(position.rad_per_count(), FRAC_PI_2);
		assert!(!position.wraps());
	}

	#[test]
	#[should_panic]
	fn zero_resolution_is_rejected() {
		EncoderPosition::new(EncoderOptions::new(0));
	}

	#[test]
	fn unwrapped_angle_tracks_multiple_turns() {
		let position = position_at(3 * 1024 + 256, EncoderOptions::new(1024));
		assert_close(position.angle(), 3.0 * TAU + FRAC_PI_2);

		let position = position_at(-1024, EncoderOptions::new(1024));
		assert_close(position.angle(), -TAU);
	}

	#[test]
	fn full_turn_round_trip() {
		let unwrapped = position_at(1024, EncoderOptions::new(1024));
		assert_close(unwrapped.angle(), TAU);

		let wrapped = position_at(1024, EncoderOptions::new(1024).with_wrap_angle(true));
		assert_close(wrapped.angle(), 0.0);
	}

	#[test]
	fn three_half_turns_wrap_to_pi() {
		let position = position_at(1500, EncoderOptions::new(1000).with_wrap_angle(true));
		assert_eq!(position.count(), 1500);
		assert_close(position.angle(), PI);
	}

	#[test]
	fn wrap_boundary_is_positive_pi() {
		let options = EncoderOptions::new(8).with_wrap_angle(true);

		assert_close(position_at(4, options).angle(), PI);
		assert_close(position_at(-4, options).angle(), PI);
		assert_close(position_at(5, options).angle(), -3.0 * PI / 4.0);
		assert_close(position_at(-3, options).angle(), -3.0 * PI / 4.0);
	}

	#[test]
	fn wrap_count_handles_odd_resolution() {
		assert_eq!(wrap_count(1, 3), 1);
		assert_eq!(wrap_count(2, 3), -1);
		assert_eq!(wrap_count(-2, 3), 1);
		assert_eq!(wrap_count(i32::MIN, 3), 1);
	}

	#[test]
	fn zero_resets_any_history() {
		let position = position_at(-777, EncoderOptions::new(100).with_wrap_angle(true));
		position.zero();
		assert_eq!(position.count(), 0);
		assert_eq!(position.angle(), 0.0);
	}

	#[test]
	fn repeated_reads_are_stable() {
		let position = position_at(37, EncoderOptions::new(360));
		let first = position.angle();
		assert_eq!(position.angle(), first);
		assert_eq!(position.angle(), first);
	}

	#[test]
	fn count_wraps_instead_of_overflowing() {
		let position = position_at(i32::MAX, EncoderOptions::default());
		position.step(1);
		assert_eq!(position.count(), i32::MIN);
	}
}
