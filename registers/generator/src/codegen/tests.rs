// Licensed under the Apache-2.0 license

//! Tests for the generation pipeline.

mod test {
    use super::super::{generate_header, GenerateOptions};
    use crate::error::Error;
    use crate::output::TargetLanguage;
    use crate::types::{FieldRow, RegisterMap, RegisterMetadata};

    fn register(name: &str, address: &str, width: u32, description: &str) -> RegisterMetadata {
        RegisterMetadata {
            name: name.to_string(),
            address: address.to_string(),
            width_bits: width,
            reset_value: "0x00".to_string(),
            access_type: "RW".to_string(),
            description: description.to_string(),
        }
    }

    fn field(register: &str, name: &str, bit: &str) -> FieldRow {
        FieldRow {
            register: register.to_string(),
            name: name.to_string(),
            bit: bit.to_string(),
            description: String::new(),
        }
    }

    fn lights_map() -> RegisterMap {
        RegisterMap::new(
            vec![
                register("CTRL", "10", 8, "Control"),
                register("LED_PWM", "11", 16, "LED duty cycle"),
                register("SPARE", "12", 16, "Unused"),
                register("DIM", "13", 4, "Dimmer"),
            ],
            vec![
                field("CTRL", "EN", "7"),
                field("CTRL", "MODE", "6:4"),
                field("DIM", "A", "3:2"),
                field("LED_PWM", "DUTY", "9:0"),
                field("DIM", "B", "1:0"),
            ],
        )
    }

    fn cpp() -> GenerateOptions {
        GenerateOptions::new(TargetLanguage::Cpp)
    }

    /// Runs the generated C++ decode statements of `register` against `n`.
    ///
    /// Returns `(lo, value)` for every field, parsed from lines of the form
    /// `NAME = (n >> LO) & MASK;` inside the register's `operator=`.
    fn run_decode(header: &str, register: &str, n: u64) -> Vec<(u32, u64)> {
        let start = header
            .find(&format!("{register}& operator="))
            .expect("operator= not found");
        let body = &header[start..];
        let body = &body[..body.find("return *this;").unwrap()];
        body.lines()
            .skip(1)
            .filter(|l| l.contains("(n >> "))
            .map(|line| {
                let expr = line.split_once('=').unwrap().1.trim().trim_end_matches(';');
                let (shift, mask) = expr.split_once(") & ").unwrap();
                let lo: u32 = shift.trim_start_matches("(n >> ").parse().unwrap();
                let mask = u64::from_str_radix(mask.trim_start_matches("0x"), 16).unwrap();
                (lo, (n >> lo) & mask)
            })
            .collect()
    }

    #[test]
    fn test_scenario_partial_register() {
        let header = generate_header(&lights_map(), &cpp()).unwrap();
        println!("{header}");
        assert!(header.contains(
            "struct CTRL {\n    uint8_t EN       : 1;\n    uint8_t MODE     : 3;\n    uint8_t RESERVED : 4;     // Reserved\n"
        ));
        assert!(header.contains("        EN       = (n >> 7) & 0x1;\n"));
        assert!(header.contains("        MODE     = (n >> 4) & 0x7;\n"));
        assert!(header.contains("        RESERVED = (n >> 0) & 0xf;\n"));
    }

    #[test]
    fn test_scenario_missing_field_rows() {
        let header = generate_header(&lights_map(), &cpp()).unwrap();
        assert!(header.contains("// Missing sheet for SPARE\n"));
        assert!(!header.contains("struct SPARE"));
        assert!(!header.contains("SPARE& operator="));
        assert!(header.contains("    SPARE   = 0x12, // Unused\n"));
    }

    #[test]
    fn test_scenario_fully_covered() {
        let header = generate_header(&lights_map(), &cpp()).unwrap();
        let start = header.find("struct DIM {").unwrap();
        let block = &header[start..];
        let block = &block[..block.find("};\n\n").unwrap()];
        assert!(!block.contains("RESERVED"));
        assert!(block.contains("    uint8_t A : 2;\n    uint8_t B : 2;\n"));
    }

    #[test]
    fn test_scenario_malformed_locator() {
        let mut map = lights_map();
        map.fields.push(field("SPARE", "BAD", "5:"));
        let err = generate_header(&map, &cpp()).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedBitLocator {
                register: "SPARE".to_string(),
                locator: "5:".to_string(),
                reason: "`` is not a bit index".to_string(),
            }
        );
    }

    #[test]
    fn test_layout_order_in_output() {
        let header = generate_header(&lights_map(), &cpp()).unwrap();
        let pwm = header.find("struct LED_PWM {").unwrap();
        let block = &header[pwm..];
        let reserved = block.find("RESERVED : 6;").unwrap();
        let duty = block.find("DUTY     : 10;").unwrap();
        assert!(reserved < duty);
    }

    #[test]
    fn test_register_and_table_order_follow_index() {
        let header = generate_header(&lights_map(), &cpp()).unwrap();
        let positions: Vec<usize> = ["struct CTRL", "struct LED_PWM", "Missing sheet for SPARE", "struct DIM"]
            .iter()
            .map(|needle| header.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let table = &header[header.find("enum class Register").unwrap()..];
        let rows: Vec<usize> = ["CTRL ", "LED_PWM", "SPARE", "DIM "]
            .iter()
            .map(|needle| table.find(needle).unwrap())
            .collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        assert!(header.ends_with("};\n"));
    }

    #[test]
    fn test_prologue_first() {
        let header = generate_header(&lights_map(), &cpp()).unwrap();
        assert!(header.starts_with("#pragma once\n#include <stdint.h>\n"));
    }

    #[test]
    fn test_deterministic() {
        for lang in TargetLanguage::ALL {
            let options = GenerateOptions::new(lang);
            let first = generate_header(&lights_map(), &options).unwrap();
            let second = generate_header(&lights_map(), &options).unwrap();
            assert_eq!(first, second, "{lang} output differs between runs");
        }
    }

    #[test]
    fn test_generated_decode_round_trip() {
        let map = RegisterMap::new(
            vec![register("MIX", "0", 12, "Mixed fields")],
            vec![
                field("MIX", "TOP", "11"),
                field("MIX", "MID", "8:6"),
                field("MIX", "LOW", "2:1"),
            ],
        );
        let header = generate_header(&map, &cpp()).unwrap();
        for n in 0..(1u64 << 12) {
            let fields = run_decode(&header, "MIX", n);
            assert_eq!(fields.len(), 6);
            let rebuilt = fields.iter().fold(0, |acc, (lo, v)| acc | (v << lo));
            assert_eq!(rebuilt, n);
        }
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let mut map = lights_map();
        map.registers.push(register("CTRL", "20", 8, "Again"));
        assert_eq!(
            generate_header(&map, &cpp()),
            Err(Error::DuplicateRegister("CTRL".to_string()))
        );
    }

    #[test]
    fn test_overlap_aborts_run() {
        let mut map = lights_map();
        map.fields.push(field("CTRL", "CLASH", "5"));
        assert!(matches!(
            generate_header(&map, &cpp()),
            Err(Error::OverlappingFields { .. })
        ));
    }

    #[test]
    fn test_bad_address_aborts_run() {
        let mut map = lights_map();
        map.registers[2].address = "nowhere".to_string();
        assert!(matches!(
            generate_header(&map, &cpp()),
            Err(Error::MalformedAddress { .. })
        ));
    }

    #[test]
    fn test_orphan_fields_ignored() {
        let mut map = lights_map();
        map.fields.push(field("GHOST", "X", "0"));
        let header = generate_header(&map, &cpp()).unwrap();
        assert!(!header.contains("GHOST"));
    }

    #[test]
    fn test_c_output() {
        let options = GenerateOptions::new(TargetLanguage::C).header_name("lights");
        let header = generate_header(&lights_map(), &options).unwrap();
        assert!(header.starts_with("#ifndef LIGHTS_H\n#define LIGHTS_H\n"));
        assert!(header.contains("} CTRL;\n"));
        assert!(header.contains("static inline void CTRL_assign(CTRL *r, uint8_t n) {\n"));
        assert!(header.contains("/* Missing sheet for SPARE */\n"));
        assert!(header.contains("    SPARE_ADDR   = 0x12, /* Unused */\n"));
        assert!(header.ends_with("#endif /* LIGHTS_H */\n"));
    }

    #[test]
    fn test_rust_output() {
        let options = GenerateOptions::new(TargetLanguage::Rust);
        let header = generate_header(&lights_map(), &options).unwrap();
        assert!(header.contains("pub struct LedPwm {\n"));
        assert!(header.contains("impl From<u16> for LedPwm {\n"));
        assert!(header.contains("            duty:     (n >> 0) & 0x3ff,\n"));
        assert!(header.contains("// Missing sheet for SPARE\n"));
        assert!(header.contains("    LedPwm = 0x11, // LED duty cycle\n"));
    }

    #[test]
    fn test_empty_map() {
        let header = generate_header(&RegisterMap::default(), &cpp()).unwrap();
        assert!(header.contains("enum class Register : uint32_t {\n};\n"));
    }

    fn member_idents(header: &str, ty: &str) -> Vec<String> {
        let prefix = format!("    {ty} ");
        header
            .lines()
            .filter_map(|l| l.strip_prefix(&prefix))
            .filter_map(|l| l.split_whitespace().next())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_explicit_numbered_name_not_reused() {
        let map = RegisterMap::new(
            vec![register("STAT", "20", 8, "Status")],
            vec![field("STAT", "RESERVED1", "5:4"), field("STAT", "EN", "2")],
        );
        let header = generate_header(&map, &cpp()).unwrap();
        println!("{header}");
        assert_eq!(
            member_idents(&header, "uint8_t"),
            ["RESERVED0", "RESERVED1", "RESERVED2", "EN", "RESERVED3"]
        );
        assert_eq!(header.matches("RESERVED1 = (n >> 4) & 0x3;").count(), 1);

        let header = generate_header(&map, &GenerateOptions::new(TargetLanguage::Rust)).unwrap();
        for member in ["reserved0", "reserved1", "reserved2", "en", "reserved3"] {
            assert_eq!(
                header.matches(&format!("    pub {member}: u8,\n")).count(),
                1,
                "{member}"
            );
        }
    }

    #[test]
    fn test_type_names_unique() {
        let map = RegisterMap::new(
            vec![
                register("Register", "1", 8, ""),
                register("LED-PWM", "2", 8, ""),
                register("LED_PWM", "3", 8, ""),
            ],
            vec![
                field("Register", "EN", "0"),
                field("LED-PWM", "EN", "0"),
                field("LED_PWM", "EN", "0"),
            ],
        );
        let header = generate_header(&map, &GenerateOptions::new(TargetLanguage::Rust)).unwrap();
        println!("{header}");
        assert!(header.contains("pub struct Register0 {\n"));
        assert!(header.contains("pub struct LedPwm0 {\n"));
        assert!(header.contains("pub struct LedPwm1 {\n"));
        assert!(header.contains("impl From<u8> for LedPwm1 {\n"));
        assert!(!header.contains("pub struct Register {"));
        assert!(!header.contains("pub struct LedPwm {"));
        assert!(header.contains("pub enum Register {\n"));

        let map = RegisterMap::new(
            vec![register("Register", "1", 8, "")],
            vec![field("Register", "EN", "0")],
        );
        let header = generate_header(&map, &cpp()).unwrap();
        assert!(header.contains("struct Register0 {\n"));
        assert!(header.contains("    Register0& operator=(uint8_t n) {\n"));
        assert!(header.contains("enum class Register : uint32_t {\n"));
    }
}
