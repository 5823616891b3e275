use core::f32::consts::PI;

use usbd_hid::descriptor::{generator_prelude::*, SerializedDescriptor};


/// The report ID for the knob angle report.
pub const HID_KNOB_REPORT_ID: u8 = 1;
/// The size (in bytes) for the knob angle report.
pub const HID_KNOB_SIZE: usize = size_of::<KnobReport>();


/// Reports the encoder as a single absolute joystick axis.
#[derive(Default)]
#[gen_hid_descriptor(
	(collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = JOYSTICK) = {
		(report_id = 0x01,) = {
			(usage_page = GENERIC_DESKTOP,) = {
				(usage = X,) = {
					#[item_settings data, variable, absolute] x = input;
				};
			};
		}
	}
)]
pub struct KnobReport {
	pub x: i16,
}

impl KnobReport {
	/// Maps an angle in `(-π, +π]` onto the full axis range.
	/// Angles outside a single turn saturate at the axis ends.
	pub fn from_angle(angle: f32) -> Self {
		Self {
			x: (angle / PI * i16::MAX as f32) as i16,
		}
	}

	/// Converts the report into raw bytes.
	/// An extra byte is added at the start, this is the report ID.
	pub fn to_bytes(&self) -> [u8; HID_KNOB_SIZE + 1] {
		let [lo, hi] = self.x.to_le_bytes();

		[HID_KNOB_REPORT_ID, lo, hi]
	}
}
