#![no_std]
#![no_main]

// Ensures that the program is halted on panic.
extern crate panic_halt;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

use pico_quad_encoder::controller::{self, USB_POLL_RATE_MS};
use pico_quad_encoder::hid_desc::KnobReport;

// The "rp_pico" crate is a Board Support Package for the RP2040 Hardware Abstraction Layer.
// Whenever the "bsp" alias is used, it is directly referencing the rp_pico crate.
use rp_pico as bsp;

// The macro for the start-up function.
use bsp::entry;

// Shorter alias for the Peripheral Access Crate.
use bsp::hal::pac;
use pac::interrupt;

// Shorter alias for the Hardware Abstraction Layer.
use bsp::hal;

/// These are traits for handling digital pin states.
use embedded_hal::digital::InputPin;

// USB Device support.
use usb_device::{class_prelude::*, prelude::*};
use usbd_hid::descriptor::SerializedDescriptor;
use usbd_hid::hid_class::HIDClass;


#[entry]
fn main() -> ! {
	// Get access to the RP2040 peripherals.
	let mut pac = pac::Peripherals::take().unwrap();

	// Set up the watchdog driver - needed by the clock setup code.
	let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

	// Configure the clocks.
	let clocks = hal::clocks::init_clocks_and_plls(
		bsp::XOSC_CRYSTAL_FREQ,
		pac.XOSC,
		pac.CLOCKS,
		pac.PLL_SYS,
		pac.PLL_USB,
		&mut pac.RESETS,
		&mut watchdog,
	)
		.ok()
		.unwrap();

	// Set up the pins.
	let sio = hal::Sio::new(pac.SIO);
	let pins = bsp::Pins::new(
		pac.IO_BANK0,
		pac.PADS_BANK0,
		sio.gpio_bank0,
		&mut pac.RESETS,
	);

	/* ~~ GPIO/PINOUT CONFIGURATION START ~~ */

	let enc_pin_a = pins.gpio14.into_pull_up_input().into_dyn_pin();
	let enc_pin_b = pins.gpio15.into_pull_up_input().into_dyn_pin();
	let mut sw_zero_pin = pins.gpio0.into_pull_up_input();

	/* ~~ GPIO/PINOUT CONFIGURATION END ~~ */

	let position = controller::attach(enc_pin_a, enc_pin_b);

	#[cfg(feature = "defmt")]
	defmt::info!("knob attached: {} counts/rev", position.counts_per_rev());

	// Edges start arriving as soon as the bank interrupt is unmasked.
	unsafe {
		cortex_m::peripheral::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
	}

	// Set up the USB driver.
	let usb_bus = UsbBusAllocator::new(hal::usb::UsbBus::new(
		pac.USBCTRL_REGS,
		pac.USBCTRL_DPRAM,
		clocks.usb_clock,
		true,
		&mut pac.RESETS,
	));

	let mut hid = HIDClass::new(&usb_bus, KnobReport::desc(), USB_POLL_RATE_MS);

	let mut usb_dev = UsbDeviceBuilder::new(&usb_bus, UsbVidPid(0x00, 0x00))
		.strings(&[StringDescriptors::default()
			.manufacturer("pico-quad-encoder")
			.product("Quadrature Knob")
			.serial_number("0000")
		])
		.unwrap()
		.device_class(0x00)
		.build();

	loop {
		usb_dev.poll(&mut [&mut hid]);

		// The switch pulls the pin low while pressed.
		if sw_zero_pin.is_low().unwrap_or(false) {
			position.zero();
		}

		let report = KnobReport::from_angle(position.angle());

		// The endpoint is busy until the host polls; the next loop retries.
		let _ = hid.push_raw_input(&report.to_bytes());
	}
}

#[interrupt]
fn IO_IRQ_BANK0() {
	controller::on_bank0_interrupt();
}
