//! Decoder catalog: DataWedge `PARAM_LIST` decoder keys and their short names.
//!
//! Reference: DataWedge 15.0 decoder parameters.  Each key is enabled or
//! disabled by setting it to `"true"` / `"false"` inside the BARCODE plugin's
//! parameter list.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::Category;

/// One decoder known to DataWedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderEntry {
    /// Parameter key in the BARCODE plugin (`decoder_ean13`).
    pub wire_key: &'static str,
    /// Application-facing name (`EAN-13`).
    pub human_name: &'static str,
    pub category: Category,
}

const fn entry(wire_key: &'static str, human_name: &'static str, category: Category) -> DecoderEntry {
    DecoderEntry {
        wire_key,
        human_name,
        category,
    }
}

/// Every decoder, in the order commands list them.
///
/// Keys are unique, and so are human names.
pub const DECODERS: &[DecoderEntry] = &[
    // ── 1D ───────────────────────────────────────────────────────────────────
    entry("decoder_codabar", "Codabar", Category::OneD),
    entry("decoder_code11", "Code 11", Category::OneD),
    entry("decoder_code32", "Code 32", Category::OneD),
    entry("decoder_code39", "Code 39", Category::OneD),
    entry("decoder_code93", "Code 93", Category::OneD),
    entry("decoder_code128", "Code 128", Category::OneD),
    entry("decoder_d2of5", "Discrete 2of5", Category::OneD),
    entry("decoder_i2of5", "Interleaved 2of5", Category::OneD),
    entry("decoder_matrix_2of5", "Matrix 2of5", Category::OneD),
    entry("decoder_chinese_2of5", "Chinese 2of5", Category::OneD),
    entry("decoder_korean_3of5", "Korean 3of5", Category::OneD),
    entry("decoder_msi", "MSI", Category::OneD),
    entry("decoder_tlc39", "TLC 39", Category::OneD),
    entry("decoder_trioptic39", "Trioptic39", Category::OneD),
    // ── UPC / EAN ────────────────────────────────────────────────────────────
    entry("decoder_upca", "UPC-A", Category::OneD),
    entry("decoder_upce0", "UPC-E0", Category::OneD),
    entry("decoder_upce1", "UPC-E1", Category::OneD),
    entry("decoder_ean8", "EAN-8", Category::OneD),
    entry("decoder_ean13", "EAN-13", Category::OneD),
    // ── GS1 DataBar ──────────────────────────────────────────────────────────
    entry("decoder_gs1_databar", "GS1 DataBar", Category::OneD),
    entry("decoder_gs1_databar_lim", "GS1 DataBar Limited", Category::OneD),
    entry("decoder_gs1_databar_exp", "GS1 DataBar Expanded", Category::OneD),
    // ── 2D ───────────────────────────────────────────────────────────────────
    entry("decoder_qrcode", "QR", Category::TwoD),
    entry("decoder_gs1_qrcode", "GS1 QR", Category::TwoD),
    entry("decoder_microqr", "MicroQR", Category::TwoD),
    entry("decoder_datamatrix", "DataMatrix", Category::TwoD),
    entry("decoder_gs1_datamatrix", "GS1 DataMatrix", Category::TwoD),
    entry("decoder_pdf417", "PDF417", Category::TwoD),
    entry("decoder_micropdf", "MicroPDF", Category::TwoD),
    entry("decoder_maxicode", "Maxicode", Category::TwoD),
    entry("decoder_aztec", "Aztec", Category::TwoD),
    entry("decoder_dotcode", "DotCode", Category::TwoD),
    entry("decoder_hanxin", "Han Xin", Category::TwoD),
    entry("decoder_grid_matrix", "Grid Matrix", Category::TwoD),
    // ── Composite ────────────────────────────────────────────────────────────
    entry("decoder_composite_ab", "Composite AB", Category::Composite),
    entry("decoder_composite_c", "Composite C", Category::Composite),
    // ── Postal ───────────────────────────────────────────────────────────────
    entry("decoder_australian_postal", "Australian Postal", Category::Postal),
    entry("decoder_canadian_postal", "Canadian Postal", Category::Postal),
    entry("decoder_dutch_postal", "Dutch Postal", Category::Postal),
    entry("decoder_finnish_postal_4s", "Finnish Postal 4S", Category::Postal),
    entry("decoder_japanese_postal", "Japanese Postal", Category::Postal),
    entry("decoder_uk_postal", "UK Postal", Category::Postal),
    entry("decoder_us_postal", "US Postal", Category::Postal),
    entry("decoder_usplanet", "USPlanet", Category::Postal),
    entry("decoder_uspostnet", "USPostnet", Category::Postal),
    entry("decoder_us4state", "US4state", Category::Postal),
    entry("decoder_us4state_fics", "US4state FICS", Category::Postal),
    entry("decoder_mailmark", "Mailmark", Category::Postal),
    // ── OCR ──────────────────────────────────────────────────────────────────
    entry("decoder_ocr_a", "OCR A", Category::Ocr),
    entry("decoder_ocr_b", "OCR B", Category::Ocr),
    // ── Special ──────────────────────────────────────────────────────────────
    entry("decoder_signature", "Decoder Signature", Category::Special),
    entry("decoder_micr_e13b", "MICR E13B", Category::Special),
    entry("decoder_us_currency", "US Currency", Category::Special),
];

static BY_KEY: LazyLock<HashMap<&'static str, &'static DecoderEntry>> =
    LazyLock::new(|| DECODERS.iter().map(|e| (e.wire_key, e)).collect());

static BY_NAME: LazyLock<HashMap<&'static str, &'static DecoderEntry>> =
    LazyLock::new(|| DECODERS.iter().map(|e| (e.human_name, e)).collect());

/// Returns the short name for a decoder key, or `None` if the key is unknown.
pub fn decoder_human_name(wire_key: &str) -> Option<&'static str> {
    BY_KEY.get(wire_key).map(|e| e.human_name)
}

pub fn is_valid_decoder_key(wire_key: &str) -> bool {
    BY_KEY.contains_key(wire_key)
}

pub fn all_decoder_keys() -> Vec<&'static str> {
    DECODERS.iter().map(|e| e.wire_key).collect()
}

pub fn all_decoder_names() -> Vec<&'static str> {
    DECODERS.iter().map(|e| e.human_name).collect()
}

/// Returns the catalog entries whose human name is in `wanted`.
///
/// The result follows catalog order, not the order of `wanted`.  Names not in
/// the catalog are ignored.
pub fn filter_decoders_by_human_name<S: AsRef<str>>(wanted: &[S]) -> Vec<&'static DecoderEntry> {
    let wanted: HashSet<&str> = wanted.iter().map(AsRef::as_ref).collect();
    DECODERS
        .iter()
        .filter(|e| wanted.contains(e.human_name))
        .collect()
}

/// Returns the catalog entries whose key is in `wanted`, in catalog order.
pub fn filter_decoders_by_wire_keys<S: AsRef<str>>(wanted: &[S]) -> Vec<&'static DecoderEntry> {
    let wanted: HashSet<&str> = wanted.iter().map(AsRef::as_ref).collect();
    DECODERS
        .iter()
        .filter(|e| wanted.contains(e.wire_key))
        .collect()
}

/// Resolves human names to decoder keys, in catalog order.
pub fn wire_keys_for_names<S: AsRef<str>>(wanted: &[S]) -> Vec<&'static str> {
    filter_decoders_by_human_name(wanted)
        .into_iter()
        .map(|e| e.wire_key)
        .collect()
}

/// Finds a single decoder key from a loose search term such as `"ean13"`.
///
/// An exact (case-insensitive) match on the part after `decoder_` wins.
/// Otherwise the term must appear in exactly one key.
///
/// ```rust
/// use wedge_core::catalog::find_exact_decoder;
///
/// assert_eq!(find_exact_decoder("EAN13"), Some("decoder_ean13"));
/// assert_eq!(find_exact_decoder("postal"), None); // ambiguous
/// ```
pub fn find_exact_decoder(term: &str) -> Option<&'static str> {
    let term = term.to_lowercase();

    let exact = DECODERS.iter().find(|e| {
        e.wire_key
            .strip_prefix("decoder_")
            .is_some_and(|suffix| suffix == term)
    });
    if let Some(e) = exact {
        return Some(e.wire_key);
    }

    let mut partial = DECODERS.iter().filter(|e| e.wire_key.contains(term.as_str()));
    match (partial.next(), partial.next()) {
        (Some(e), None) => Some(e.wire_key),
        _ => None,
    }
}

/// Looks up an entry by human name.
pub(crate) fn by_human_name(name: &str) -> Option<&'static DecoderEntry> {
    BY_NAME.get(name).copied()
}
