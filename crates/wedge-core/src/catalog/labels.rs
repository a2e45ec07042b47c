//! Label-type catalog: the `com.symbol.datawedge.label_type` codes DataWedge
//! attaches to every scan.
//!
//! Each code carries two names:
//!
//! - `human_name` is normalised onto the decoder catalog's short names, so a
//!   scan of `LABEL-TYPE-BOOKLAND` is reported as `EAN-13`, the decoder that
//!   produced it.  This is the name scan events carry.
//! - `description` is the longer, code-specific label (`Bookland EAN`).
//!
//! Categories come from fixed membership tables; a code outside every table
//! but present in the catalog is [`Category::Special`].

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Category;

/// One label-type code reported by DataWedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTypeEntry {
    pub wire_code: &'static str,
    pub human_name: &'static str,
    pub description: &'static str,
}

impl LabelTypeEntry {
    pub fn category(&self) -> Category {
        category(self.wire_code)
    }
}

const fn label(
    wire_code: &'static str,
    human_name: &'static str,
    description: &'static str,
) -> LabelTypeEntry {
    LabelTypeEntry {
        wire_code,
        human_name,
        description,
    }
}

pub const LABEL_TYPES: &[LabelTypeEntry] = &[
    label("LABEL-TYPE-NONE", "None", "None"),
    label("LABEL-TYPE-UCCEAN128", "Code 128", "UCC/EAN 128"),
    label("LABEL-TYPE-CODE128", "Code 128", "Code 128"),
    label("LABEL-TYPE-CODE39", "Code 39", "Code 39"),
    label("LABEL-TYPE-CODE93", "Code 93", "Code 93"),
    label("LABEL-TYPE-CODABAR", "Codabar", "Codabar"),
    label("LABEL-TYPE-UPCA", "UPC-A", "UPC-A"),
    label("LABEL-TYPE-UPCE0", "UPC-E0", "UPC-E0"),
    label("LABEL-TYPE-UPCE1", "UPC-E1", "UPC-E1"),
    label("LABEL-TYPE-EAN8", "EAN-8", "EAN-8"),
    label("LABEL-TYPE-EAN13", "EAN-13", "EAN-13"),
    label("LABEL-TYPE-MSI", "MSI", "MSI"),
    label("LABEL-TYPE-EAN128", "Code 128", "EAN-128"),
    label("LABEL-TYPE-TRIOPTIC39", "Trioptic39", "Trioptic Code 39"),
    label("LABEL-TYPE-BOOKLAND", "EAN-13", "Bookland EAN"),
    label("LABEL-TYPE-COUPON", "Code 39", "Coupon Code"),
    label("LABEL-TYPE-DATABAR14", "GS1 DataBar", "GS1 DataBar-14"),
    label("LABEL-TYPE-DATABAR_LTD", "GS1 DataBar Limited", "GS1 DataBar Limited"),
    label("LABEL-TYPE-DATABAR_EXP", "GS1 DataBar Expanded", "GS1 DataBar Expanded"),
    label("LABEL-TYPE-USPOSTNET", "USPostnet", "US Postnet"),
    label("LABEL-TYPE-USPLANET", "USPlanet", "US Planet"),
    label("LABEL-TYPE-UKPOSTAL", "UK Postal", "UK Postal"),
    label("LABEL-TYPE-JAPPOSTAL", "Japanese Postal", "Japan Postal"),
    label("LABEL-TYPE-AUSPOSTAL", "Australian Postal", "Australian Postal"),
    label("LABEL-TYPE-DUTCHPOSTAL", "Dutch Postal", "Dutch Postal"),
    label("LABEL-TYPE-FINNISHPOSTAL", "Finnish Postal 4S", "Finnish Postal"),
    label("LABEL-TYPE-CANPOSTAL", "Canadian Postal", "Canadian Postal"),
    label("LABEL-TYPE-CHINESE25", "Chinese 2of5", "Chinese 2 of 5"),
    label("LABEL-TYPE-KOREAN35", "Korean 3of5", "Korean 3 of 5"),
    label("LABEL-TYPE-CODE11", "Code 11", "Code 11"),
    label("LABEL-TYPE-IATA25", "Interleaved 2of5", "IATA 2 of 5"),
    label("LABEL-TYPE-MATRIX25", "Matrix 2of5", "Matrix 2 of 5"),
    label("LABEL-TYPE-AIRLINE25", "Interleaved 2of5", "Airline 2 of 5"),
    label("LABEL-TYPE-INDUSTRIAL25", "Interleaved 2of5", "Industrial 2 of 5"),
    label("LABEL-TYPE-STANDARD25", "Interleaved 2of5", "Standard 2 of 5"),
    label("LABEL-TYPE-DATAMATRIX", "DataMatrix", "Data Matrix"),
    label("LABEL-TYPE-QRCODE", "QR", "QR Code"),
    label("LABEL-TYPE-MAXICODE", "Maxicode", "MaxiCode"),
    label("LABEL-TYPE-PDF417", "PDF417", "PDF417"),
    label("LABEL-TYPE-MICROPDF", "MicroPDF", "MicroPDF417"),
    label("LABEL-TYPE-AZTEC", "Aztec", "Aztec"),
    label("LABEL-TYPE-COMPOSITE_CC_A", "Composite AB", "Composite CC-A"),
    label("LABEL-TYPE-COMPOSITE_CC_B", "Composite AB", "Composite CC-B"),
    label("LABEL-TYPE-COMPOSITE_CC_C", "Composite C", "Composite CC-C"),
    label("LABEL-TYPE-COMPOSITE_TLC39", "TLC 39", "Composite TLC-39"),
    label("LABEL-TYPE-SIGNATURE", "Decoder Signature", "Signature Capture"),
    label("LABEL-TYPE-WEBCODE", "QR", "Web Code"),
    label("LABEL-TYPE-DISCRETE25", "Discrete 2of5", "Discrete 2 of 5"),
    label("LABEL-TYPE-GS1-128", "Code 128", "GS1-128"),
    label("LABEL-TYPE-GS1-DATABAR", "GS1 DataBar", "GS1 DataBar"),
    label("LABEL-TYPE-ISBT128", "Code 128", "ISBT 128"),
    label("LABEL-TYPE-MAILMARK", "Mailmark", "Royal Mail Mailmark"),
    label("LABEL-TYPE-HANXIN", "Han Xin", "Han Xin Code"),
    label("LABEL-TYPE-GRIDMATRIX", "Grid Matrix", "Grid Matrix"),
    label("LABEL-TYPE-DOTCODE", "DotCode", "DotCode"),
    label("LABEL-TYPE-DIGIMARC", "QR", "Digimarc"),
];

// ── Category membership tables ────────────────────────────────────────────────

const ONE_D: &[&str] = &[
    "LABEL-TYPE-CODE128",
    "LABEL-TYPE-CODE39",
    "LABEL-TYPE-CODE93",
    "LABEL-TYPE-CODABAR",
    "LABEL-TYPE-UPCA",
    "LABEL-TYPE-UPCE0",
    "LABEL-TYPE-UPCE1",
    "LABEL-TYPE-EAN8",
    "LABEL-TYPE-EAN13",
    "LABEL-TYPE-MSI",
    "LABEL-TYPE-EAN128",
    "LABEL-TYPE-UCCEAN128",
    "LABEL-TYPE-GS1-128",
    "LABEL-TYPE-ISBT128",
    "LABEL-TYPE-CODE11",
    "LABEL-TYPE-CHINESE25",
    "LABEL-TYPE-KOREAN35",
    "LABEL-TYPE-IATA25",
    "LABEL-TYPE-MATRIX25",
    "LABEL-TYPE-AIRLINE25",
    "LABEL-TYPE-INDUSTRIAL25",
    "LABEL-TYPE-STANDARD25",
    "LABEL-TYPE-DISCRETE25",
    "LABEL-TYPE-DATABAR14",
    "LABEL-TYPE-DATABAR_LTD",
    "LABEL-TYPE-DATABAR_EXP",
    "LABEL-TYPE-GS1-DATABAR",
];

const TWO_D: &[&str] = &[
    "LABEL-TYPE-DATAMATRIX",
    "LABEL-TYPE-QRCODE",
    "LABEL-TYPE-MAXICODE",
    "LABEL-TYPE-PDF417",
    "LABEL-TYPE-MICROPDF",
    "LABEL-TYPE-AZTEC",
    "LABEL-TYPE-HANXIN",
    "LABEL-TYPE-GRIDMATRIX",
    "LABEL-TYPE-DOTCODE",
];

const POSTAL: &[&str] = &[
    "LABEL-TYPE-USPOSTNET",
    "LABEL-TYPE-USPLANET",
    "LABEL-TYPE-UKPOSTAL",
    "LABEL-TYPE-JAPPOSTAL",
    "LABEL-TYPE-AUSPOSTAL",
    "LABEL-TYPE-DUTCHPOSTAL",
    "LABEL-TYPE-FINNISHPOSTAL",
    "LABEL-TYPE-CANPOSTAL",
    "LABEL-TYPE-MAILMARK",
];

const COMPOSITE: &[&str] = &[
    "LABEL-TYPE-COMPOSITE_CC_A",
    "LABEL-TYPE-COMPOSITE_CC_B",
    "LABEL-TYPE-COMPOSITE_CC_C",
    "LABEL-TYPE-COMPOSITE_TLC39",
];

const NO_LABEL: &str = "LABEL-TYPE-NONE";

static BY_CODE: LazyLock<HashMap<&'static str, &'static LabelTypeEntry>> =
    LazyLock::new(|| LABEL_TYPES.iter().map(|e| (e.wire_code, e)).collect());

static CATEGORIES: LazyLock<HashMap<&'static str, Category>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for (codes, category) in [
        (ONE_D, Category::OneD),
        (TWO_D, Category::TwoD),
        (POSTAL, Category::Postal),
        (COMPOSITE, Category::Composite),
    ] {
        for code in codes {
            table.insert(*code, category);
        }
    }
    table.insert(NO_LABEL, Category::None);
    table
});

pub fn label_entry(wire_code: &str) -> Option<&'static LabelTypeEntry> {
    BY_CODE.get(wire_code).copied()
}

/// Returns the normalised name for a label-type code.
///
/// Unknown codes come back unchanged; callers treat that as a graceful
/// fallback, not an error.
///
/// ```rust
/// use wedge_core::catalog::label_human_name;
///
/// assert_eq!(label_human_name("LABEL-TYPE-EAN13"), "EAN-13");
/// assert_eq!(label_human_name("LABEL-TYPE-FUTURE"), "LABEL-TYPE-FUTURE");
/// ```
pub fn label_human_name(wire_code: &str) -> String {
    label_entry(wire_code)
        .map(|e| e.human_name.to_string())
        .unwrap_or_else(|| wire_code.to_string())
}

/// Returns the long description for a label-type code.
///
/// A missing code describes as `"Unknown"`; an unrecognised one as itself.
pub fn label_description(wire_code: Option<&str>) -> String {
    match wire_code {
        Some(code) => label_entry(code)
            .map(|e| e.description.to_string())
            .unwrap_or_else(|| code.to_string()),
        None => "Unknown".to_string(),
    }
}

/// Classifies a label-type code.
pub fn category(wire_code: &str) -> Category {
    match CATEGORIES.get(wire_code) {
        Some(category) => *category,
        None if BY_CODE.contains_key(wire_code) => Category::Special,
        None => Category::Unknown,
    }
}

pub fn is_one_d(wire_code: &str) -> bool {
    category(wire_code) == Category::OneD
}

pub fn is_two_d(wire_code: &str) -> bool {
    category(wire_code) == Category::TwoD
}

pub fn is_postal(wire_code: &str) -> bool {
    category(wire_code) == Category::Postal
}

pub fn is_composite(wire_code: &str) -> bool {
    category(wire_code) == Category::Composite
}
