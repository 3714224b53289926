// Licensed under the Apache-2.0 license

//! Bitfield layout engine.
//!
//! Turns the sparse, hand-written field list of one register into a complete
//! layout: every bit in `[0, width)` belongs to exactly one field, gaps are
//! filled with reserved fields, and fields are ordered most-significant first.
//!
//! ```text
//! width 8, fields { EN: 7, MODE: 6:4 }
//!
//!   7    6  5  4    3  2  1  0
//! [EN] [  MODE  ] [ RESERVED  ]
//! ```

use crate::error::{Error, Result};
use crate::types::FieldRow;

/// Name given to synthesized filler fields.
pub const RESERVED_NAME: &str = "RESERVED";

/// Description given to synthesized filler fields.
pub const RESERVED_DESCRIPTION: &str = "Reserved";

/// Widest register the engine lays out.
pub const MAX_WIDTH: u32 = 64;

/// One field of a register layout, spanning bits `hi..=lo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub hi: u32,
    pub lo: u32,
    pub description: String,
    /// True for filler fields synthesized over undocumented bits.
    pub reserved: bool,
}

impl FieldDescriptor {
    /// Number of bits covered.
    pub fn bits(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Right-aligned mask for this field's value, e.g. `0x7` for a 3-bit field.
    pub fn mask(&self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }

    /// Extracts this field's value from a raw register value.
    pub fn extract(&self, n: u64) -> u64 {
        (n >> self.lo) & self.mask()
    }
}

/// The complete, gap-filled, MSB-first field list of one register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterLayout {
    width: u32,
    fields: Vec<FieldDescriptor>,
}

impl RegisterLayout {
    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Fields ordered by `hi`, most significant first.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of synthesized reserved fields.
    pub fn reserved_count(&self) -> usize {
        self.fields.iter().filter(|f| f.reserved).count()
    }

    /// Splits a raw value into one value per field, in layout order.
    pub fn decode(&self, n: u64) -> Vec<u64> {
        self.fields.iter().map(|f| f.extract(n)).collect()
    }

    /// Recomposes a raw value from per-field values given in layout order.
    ///
    /// Values wider than their field are truncated to the field width.
    pub fn encode(&self, values: &[u64]) -> u64 {
        self.fields
            .iter()
            .zip(values)
            .fold(0, |acc, (f, v)| acc | ((v & f.mask()) << f.lo))
    }
}

/// Parses a bit locator (`"5"` or `"7:4"`) into `(hi, lo)` for a register of
/// `width` bits.
pub fn parse_bit_locator(register: &str, width: u32, locator: &str) -> Result<(u32, u32)> {
    let malformed = |reason: String| Error::MalformedBitLocator {
        register: register.to_string(),
        locator: locator.to_string(),
        reason,
    };
    let parse_index = |s: &str| {
        let s = s.trim();
        s.parse::<u32>()
            .map_err(|_| malformed(format!("`{s}` is not a bit index")))
    };

    let (hi, lo) = match locator.split_once(':') {
        Some((hi, lo)) => (parse_index(hi)?, parse_index(lo)?),
        None => {
            let n = parse_index(locator)?;
            (n, n)
        }
    };
    if hi < lo {
        return Err(malformed(format!("high bit {hi} is below low bit {lo}")));
    }
    if hi >= width {
        return Err(malformed(format!(
            "bit {hi} is outside a {width}-bit register"
        )));
    }
    Ok((hi, lo))
}

/// Builds the complete layout of `register` from its field rows.
///
/// Uncovered bits are grouped into maximal contiguous runs, each of which
/// becomes one reserved field. Explicit fields that share a bit are rejected.
pub fn build_layout(register: &str, width: u32, rows: &[&FieldRow]) -> Result<RegisterLayout> {
    if width == 0 || width > MAX_WIDTH {
        return Err(Error::InvalidWidth {
            register: register.to_string(),
            width,
        });
    }

    let mut fields: Vec<FieldDescriptor> = Vec::with_capacity(rows.len() + 1);
    // Index into `fields` of the explicit field owning each bit.
    let mut owner: Vec<Option<usize>> = vec![None; width as usize];

    for row in rows {
        let (hi, lo) = parse_bit_locator(register, width, row.bit.trim())?;
        let idx = fields.len();
        for bit in lo..=hi {
            if let Some(prev) = owner[bit as usize] {
                let prev = &fields[prev];
                return Err(Error::OverlappingFields {
                    register: register.to_string(),
                    field: row.name.trim().to_string(),
                    other: prev.name.clone(),
                });
            }
            owner[bit as usize] = Some(idx);
        }
        fields.push(FieldDescriptor {
            name: row.name.trim().to_string(),
            hi,
            lo,
            description: row.description.trim().to_string(),
            reserved: false,
        });
    }

    let mut run_start: Option<u32> = None;
    for bit in 0..=width {
        let free = bit < width && owner[bit as usize].is_none();
        match (free, run_start) {
            (true, None) => run_start = Some(bit),
            (false, Some(lo)) => {
                fields.push(FieldDescriptor {
                    name: RESERVED_NAME.to_string(),
                    hi: bit - 1,
                    lo,
                    description: RESERVED_DESCRIPTION.to_string(),
                    reserved: true,
                });
                run_start = None;
            }
            _ => {}
        }
    }

    fields.sort_by(|a, b| b.hi.cmp(&a.hi));

    log::debug!(
        "{register}: {} fields ({} reserved) over {width} bits",
        fields.len(),
        fields.iter().filter(|f| f.reserved).count()
    );

    Ok(RegisterLayout { width, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(fields: &[(&str, &str)]) -> Vec<FieldRow> {
        fields.iter()
            .map(|(name, bit)| FieldRow {
                register: "REG".to_string(),
                name: name.to_string(),
                bit: bit.to_string(),
                description: format!("{name} field"),
            })
            .collect()
    }

    fn layout(width: u32, fields: &[(&str, &str)]) -> Result<RegisterLayout> {
        let rows = rows(fields);
        let refs: Vec<&FieldRow> = rows.iter().collect();
        build_layout("REG", width, &refs)
    }

    fn spans(layout: &RegisterLayout) -> Vec<(&str, u32, u32)> {
        layout
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), f.hi, f.lo))
            .collect()
    }

    fn assert_complete(layout: &RegisterLayout) {
        let mut covered = 0u128;
        let mut prev_hi = None;
        for f in layout.fields() {
            let span = ((1u128 << f.bits()) - 1) << f.lo;
            assert_eq!(covered & span, 0, "{} overlaps", f.name);
            covered |= span;
            if let Some(prev) = prev_hi {
                assert!(f.hi < prev, "{} out of order", f.name);
            }
            prev_hi = Some(f.hi);
        }
        assert_eq!(covered, (1u128 << layout.width()) - 1);
    }

    #[test]
    fn test_parse_bit_locator() {
        assert_eq!(parse_bit_locator("R", 8, "7").unwrap(), (7, 7));
        assert_eq!(parse_bit_locator("R", 8, "6:4").unwrap(), (6, 4));
        assert_eq!(parse_bit_locator("R", 8, " 3 : 0 ").unwrap(), (3, 0));
        assert_eq!(parse_bit_locator("R", 64, "63:0").unwrap(), (63, 0));
    }

    #[test]
    fn test_parse_bit_locator_rejects() {
        for bad in ["5:", ":3", "", "x", "3:5", "8", "9:0", "1:2:3", "-1", "4.5"] {
            match parse_bit_locator("CTRL", 8, bad) {
                Err(Error::MalformedBitLocator {
                    register, locator, ..
                }) => {
                    assert_eq!(register, "CTRL");
                    assert_eq!(locator, bad);
                }
                other => panic!("{bad:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_partial_coverage_gets_reserved_tail() {
        let layout = layout(8, &[("EN", "7"), ("MODE", "6:4")]).unwrap();
        assert_eq!(
            spans(&layout),
            [("EN", 7, 7), ("MODE", 6, 4), (RESERVED_NAME, 3, 0)]
        );
        assert_eq!(layout.fields()[0].mask(), 0x1);
        assert_eq!(layout.fields()[1].mask(), 0x7);
        assert_eq!(layout.fields()[2].description, RESERVED_DESCRIPTION);
        assert_complete(&layout);
    }

    #[test]
    fn test_full_coverage_has_no_reserved() {
        let layout = layout(4, &[("A", "3:2"), ("B", "1:0")]).unwrap();
        assert_eq!(spans(&layout), [("A", 3, 2), ("B", 1, 0)]);
        assert_eq!(layout.reserved_count(), 0);
    }

    #[test]
    fn test_gaps_split_into_runs() {
        let layout = layout(16, &[("LO", "0"), ("MID", "7:5"), ("TOP", "15")]).unwrap();
        assert_eq!(
            spans(&layout),
            [
                ("TOP", 15, 15),
                (RESERVED_NAME, 14, 8),
                ("MID", 7, 5),
                (RESERVED_NAME, 4, 1),
                ("LO", 0, 0),
            ]
        );
        assert_complete(&layout);
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let layout = layout(8, &[("B", "1:0"), ("D", "7:6"), ("C", "5:2")]).unwrap();
        assert_eq!(spans(&layout), [("D", 7, 6), ("C", 5, 2), ("B", 1, 0)]);
    }

    #[test]
    fn test_no_explicit_fields_is_all_reserved() {
        let layout = layout(16, &[]).unwrap();
        assert_eq!(spans(&layout), [(RESERVED_NAME, 15, 0)]);
        assert!(layout.fields()[0].reserved);
    }

    #[test]
    fn test_overlap_rejected() {
        let err = layout(8, &[("A", "7:4"), ("B", "4:0")]).unwrap_err();
        assert_eq!(
            err,
            Error::OverlappingFields {
                register: "REG".to_string(),
                field: "B".to_string(),
                other: "A".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_width() {
        assert!(matches!(layout(0, &[]), Err(Error::InvalidWidth { width: 0, .. })));
        assert!(matches!(layout(65, &[]), Err(Error::InvalidWidth { width: 65, .. })));
    }

    #[test]
    fn test_malformed_locator_names_register() {
        let err = layout(8, &[("EN", "5:")]).unwrap_err();
        assert!(matches!(err, Error::MalformedBitLocator { ref register, ref locator, .. }
            if register == "REG" && locator == "5:"));
    }

    #[test]
    fn test_round_trip_exhaustive() {
        let layout = layout(10, &[("A", "9"), ("B", "7:5"), ("C", "2:1")]).unwrap();
        assert_complete(&layout);
        for n in 0..(1u64 << 10) {
            assert_eq!(layout.encode(&layout.decode(n)), n);
        }
    }

    #[test]
    fn test_round_trip_wide() {
        let layout = layout(64, &[("HI", "63:32"), ("BIT", "7")]).unwrap();
        assert_complete(&layout);
        for n in [0, 1, u64::MAX, 0x8000_0000_0000_0080, 0xdead_beef_cafe_f00d] {
            assert_eq!(layout.encode(&layout.decode(n)), n);
        }
    }
}
