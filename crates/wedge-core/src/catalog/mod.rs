//! Static catalogs of DataWedge decoders and label types.
//!
//! DataWedge names decoders by parameter key (`decoder_qrcode`) and reports
//! scanned symbologies by label-type code (`LABEL-TYPE-QRCODE`).  The
//! application works with short human names (`QR`).  Both tables are fixed at
//! compile time and indexed once, on first use, into hash maps; they are never
//! mutated afterwards, so lookups are safe from any thread.
//!
//! A catalog miss is never an error: decoder lookups return `None` or skip the
//! name, and label lookups fall back to the raw code.

pub mod decoders;
pub mod labels;

use serde::Serialize;

pub use decoders::{
    all_decoder_keys, all_decoder_names, decoder_human_name, filter_decoders_by_human_name,
    filter_decoders_by_wire_keys, find_exact_decoder, is_valid_decoder_key, wire_keys_for_names,
    DecoderEntry, DECODERS,
};
pub use labels::{
    category, is_composite, is_one_d, is_postal, is_two_d, label_description, label_entry,
    label_human_name, LabelTypeEntry, LABEL_TYPES,
};

/// Symbology family of a decoder or label type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// The "no label" code DataWedge reports when nothing was decoded.
    None,
    OneD,
    TwoD,
    Postal,
    Composite,
    Ocr,
    /// Known symbologies outside the families above (signature, currency, ...).
    Special,
    /// Codes not present in the catalog.
    Unknown,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::None => "none",
            Category::OneD => "1d",
            Category::TwoD => "2d",
            Category::Postal => "postal",
            Category::Composite => "composite",
            Category::Ocr => "ocr",
            Category::Special => "special",
            Category::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
