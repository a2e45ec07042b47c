//! # wedge-core
//!
//! Shared library for driving the DataWedge barcode-scanning service: the
//! value converter, the decoder and label-type catalogs, and the command
//! payload builders.
//!
//! This crate performs no I/O.  Everything here is a pure function over
//! freshly constructed values, so it can be called from any thread, including
//! from inside a broadcast callback while another thread builds a command.
//!
//! # Architecture overview
//!
//! DataWedge is a separate service on the scanning device.  It cannot be
//! called directly; it only understands one-way broadcast messages whose
//! extras form a flat, type-tagged key/value container.  This crate defines:
//!
//! - **`value`** – The dynamic value model used by the embedding application
//!   ([`DynamicValue`]) and the wire container DataWedge expects
//!   ([`WireContainer`]), plus the conversions between them and JSON.
//!
//! - **`catalog`** – Immutable lookup tables that map DataWedge's decoder keys
//!   (`decoder_ean13`) and label-type codes (`LABEL-TYPE-EAN13`) to stable,
//!   application-facing names (`EAN-13`).
//!
//! - **`command`** – Builders for the configuration and control commands
//!   (create profile, configure decoders, suspend/resume, generic actions).

pub mod catalog;
pub mod command;
pub mod value;

pub use catalog::{Category, DecoderEntry, LabelTypeEntry};
pub use command::{Command, CommandError, Delivery, ExtraParam, ReadRequest};
pub use value::{ConvertError, DynamicValue, WireContainer, WireValue};
