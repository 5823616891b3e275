use core::cell::RefCell;

use critical_section::Mutex;

use rp_pico as bsp;

use bsp::hal;
use hal::gpio;
use hal::gpio::Interrupt::{EdgeHigh, EdgeLow};

use crate::*;


/// The resolution of the knob encoder in a pulses per revolution metric.
pub const ENC_PPR: u32 = DEFAULT_PPR;
/// The number of counts needed to complete a full revolution.
/// Every edge of both channels is decoded.
pub const ENC_COUNTS_PER_REV: u32 = ENC_PPR * 4;
/// The speed at which the knob reports to the host.
pub const USB_POLL_RATE_MS: u8 = 1;


/// The knob position, shared by the GPIO interrupt and the main loop.
pub static KNOB_POSITION: EncoderPosition = EncoderPosition::new(
	EncoderOptions::new(ENC_COUNTS_PER_REV).with_wrap_angle(true),
);

/// The decoder driven from `IO_IRQ_BANK0`. Only the interrupt touches it after [`attach`].
static KNOB_DECODER: Mutex<RefCell<Option<KnobDecoder>>> = Mutex::new(RefCell::new(None));


// The GPIO pin order for the encoder is as follows:
// [KNOB (A, B)] -> [ZERO switch]


/// Hands both encoder channels to the interrupt-driven decoder and enables edge
/// interrupts on them. Returns the position the decoder accumulates into.
///
/// Note: The `IO_IRQ_BANK0` interrupt must still be unmasked, and its handler
/// must call [`on_bank0_interrupt`].
pub fn attach(pin_a: DynInputPin, pin_b: DynInputPin) -> &'static EncoderPosition {
	critical_section::with(|cs| {
		let mut decoder = KNOB_DECODER.borrow_ref_mut(cs);

		// Abort if the encoder has already been attached.
		if decoder.is_some() { return; }

		for pin in [&pin_a, &pin_b] {
			pin.set_interrupt_enabled(EdgeLow, true);
			pin.set_interrupt_enabled(EdgeHigh, true);
		}

		*decoder = Some(QuadDecoder::owned(pin_a, pin_b, &KNOB_POSITION));
	});

	&KNOB_POSITION
}

/// Acknowledges pending edges on the encoder channels and feeds them to the decoder.
/// Call this from the `IO_IRQ_BANK0` handler.
pub fn on_bank0_interrupt() {
	critical_section::with(|cs| {
		let mut decoder = KNOB_DECODER.borrow_ref_mut(cs);
		let Some(decoder) = decoder.as_mut() else { return; };

		let (pin_a, pin_b) = decoder.channels_mut();
		let edge_a = take_edge(pin_a);
		let edge_b = take_edge(pin_b);

		// SIO input reads are infallible.
		if edge_a {
			let _ = decoder.notify_edge_a();
		}

		if edge_b {
			let _ = decoder.notify_edge_b();
		}
	});
}

/// Clears any pending edge interrupt on the pin, returning whether one fired.
fn take_edge(pin: &mut DynInputPin) -> bool {
	let mut fired = false;

	for edge in [EdgeLow, EdgeHigh] {
		if pin.interrupt_status(edge) {
			pin.clear_interrupt(edge);
			fired = true;
		}
	}

	fired
}


/// Type alias for a non-ID pin with a pull-up input configuration.
pub type DynInputPin = gpio::Pin<gpio::DynPinId, gpio::FunctionSioInput, gpio::PullUp>;
/// Type alias for the decoder wired to the knob's channels.
pub type KnobDecoder = QuadDecoder<'static, DynInputPin, DynInputPin>;
