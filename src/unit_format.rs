//! Human-readable magnitude formatting for sizes and rates.
//!
//! A raw byte count is scaled by the chosen unit factor, then rendered
//! against a magnitude table: decimal steps of 1000 or binary steps of 1024.

/// A transfer unit from the closed registry: display symbol, description
/// and the factor applied to raw byte counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub repr: &'static str,
    pub desc: &'static str,
    pub factor: f64,
}

pub const UNITS: [Unit; 3] = [
    Unit { repr: "B", desc: "Bytes (8-bits).", factor: 1. },
    Unit { repr: "b", desc: "Bits.", factor: 8. },
    Unit { repr: "dB", desc: "Decibels.", factor: 48.1647993062 },
];

pub const BYTES: Unit = UNITS[0];

struct Prefix {
    repr: &'static str,
    value: f64,
}

const PREFIXES: [Prefix; 9] = [
    Prefix { repr: "", value: 1. },
    Prefix { repr: "K", value: 1E3 },
    Prefix { repr: "M", value: 1E6 },
    Prefix { repr: "G", value: 1E9 },
    Prefix { repr: "T", value: 1E12 },
    Prefix { repr: "P", value: 1E15 },
    Prefix { repr: "E", value: 1E18 },
    Prefix { repr: "Z", value: 1E21 },
    Prefix { repr: "Y", value: 1E24 },
];

const BINARY_PREFIXES: [Prefix; 9] = [
    Prefix { repr: "i", value: 1. },
    Prefix { repr: "Ki", value: 1024. },
    Prefix { repr: "Mi", value: 1048576. },
    Prefix { repr: "Gi", value: 1073741824. },
    Prefix { repr: "Ti", value: 1.09951162778E12 },
    Prefix { repr: "Pi", value: 1.12589990684E15 },
    Prefix { repr: "Ei", value: 1.15292150461E18 },
    Prefix { repr: "Zi", value: 1.18059162072E21 },
    Prefix { repr: "Yi", value: 1.20892581961E24 },
];

/// Looks up a unit by its registry symbol.
pub fn find_unit(repr: &str) -> Option<Unit> {
    UNITS.iter().find(|unit| unit.repr == repr).copied()
}

/// Formats a raw value with the largest magnitude prefix that does not
/// exceed it. `dim` is a dimension suffix, empty for sizes, "ps" for rates.
pub fn format_value(value: f64, unit: &Unit, binary: bool, dim: &str) -> String {
    let prefixes: &[Prefix] = if binary { &BINARY_PREFIXES } else { &PREFIXES };
    let value = value * unit.factor;
    let mut current = &prefixes[0];
    for prefix in prefixes {
        if value < prefix.value {
            break;
        }
        current = prefix;
    }
    format!("{:.2} {}{}{}", value / current.value, current.repr, unit.repr, dim)
}

#[cfg(test)]
mod test {
    use crate::unit_format::{find_unit, format_value, BYTES};

    #[test]
    fn test_decimal_format() {
        assert_eq!(format_value(1500., &BYTES, false, ""), "1.50 KB");
        assert_eq!(format_value(0., &BYTES, false, ""), "0.00 B");
        assert_eq!(format_value(999., &BYTES, false, ""), "999.00 B");
        assert_eq!(format_value(1000., &BYTES, false, ""), "1.00 KB");
        assert_eq!(format_value(2500000., &BYTES, false, "ps"), "2.50 MBps");
    }

    #[test]
    fn test_binary_format() {
        assert_eq!(format_value(1048576., &BYTES, true, ""), "1.00 MiB");
        assert_eq!(format_value(1024., &BYTES, true, ""), "1.00 KiB");
        assert_eq!(format_value(512., &BYTES, true, ""), "512.00 iB");
    }

    #[test]
    fn test_unit_factor() {
        let bits = find_unit("b").unwrap();
        assert_eq!(format_value(1000., &bits, false, ""), "8.00 Kb");
    }

    #[test]
    fn test_find_unit() {
        assert_eq!(find_unit("B").unwrap().factor, 1.);
        assert_eq!(find_unit("dB").unwrap().repr, "dB");
        assert!(find_unit("KB").is_none());
    }
}
