//! Interrupt-driven quadrature encoder decoding.
//!
//! The host detects rising and falling edges on both encoder channels and
//! calls [`QuadDecoder::notify_edge_a`] / [`QuadDecoder::notify_edge_b`] from
//! its interrupt handlers. The count lives in an [`EncoderPosition`], which
//! ordinary code can read at any time through a short critical section.
//!
//! ```
//! use pico_quad_encoder::{EncoderOptions, EncoderPosition, QuadDecoder};
//! # use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};
//! # let mut pin_a = Mock::new(&[Transaction::get(State::High)]);
//! # let mut pin_b = Mock::new(&[Transaction::get(State::High)]);
//!
//! static POSITION: EncoderPosition = EncoderPosition::new(EncoderOptions::new(4));
//!
//! let mut decoder = QuadDecoder::borrowed(&mut pin_a, &mut pin_b, &POSITION);
//! decoder.notify_edge_a().unwrap();
//!
//! assert_eq!(POSITION.angle(), core::f32::consts::FRAC_PI_2);
//! # drop(decoder);
//! # pin_a.done();
//! # pin_b.done();
//! ```
//!
//! # Features
//!
//! - **`defmt`**: logging and [`defmt::Format`] implementations.
//! - **`pico`**: the Raspberry Pi Pico knob firmware and its board modules.

#![cfg_attr(not(test), no_std)]

pub mod decoder;
pub mod error;
pub mod options;
pub mod position;

#[cfg(feature = "pico")]
pub mod controller;
#[cfg(feature = "pico")]
pub mod hid_desc;

pub use crate::decoder::*;
pub use crate::error::*;
pub use crate::options::*;
pub use crate::position::*;
