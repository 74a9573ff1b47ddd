//! Number rendering for formula strings and headlines

/// Render a value as a float: shortest round-trip digits, integral values
/// keep a trailing `.0`, very small or very large magnitudes switch to
/// scientific notation with a signed two-digit exponent (`1e-06`).
///
/// When two shortest candidates are equally close to the exact value the
/// choice can differ from Python's `repr`: `…835.25` renders as `…835.3`
/// here and as `…835.2` there.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let abs = x.abs();
    if x != 0.0 && (abs < 1e-4 || abs >= 1e16) {
        return format_scientific(x);
    }
    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Render an operand (input value or factor): integral values print
/// without a fractional part, everything else as `format_float`.
pub fn format_operand(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{}", x)
    } else {
        format_float(x)
    }
}

/// Fixed-precision rendering for headline values
pub fn format_fixed(x: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, x)
}

fn format_scientific(x: f64) -> String {
    // `{:e}` yields the shortest mantissa, e.g. "9.313225746154785e-10"
    let raw = format!("{:e}", x);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_integral_keeps_point() {
        assert_eq!(format_float(5000.0), "5000.0");
        assert_eq!(format_float(32.0), "32.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-40.0), "-40.0");
    }

    #[test]
    fn test_float_shortest_digits() {
        assert_eq!(format_float(22.0462), "22.0462");
        assert_eq!(format_float(1.0 / 60.0), "0.016666666666666666");
        assert_eq!(format_float(1.0 / 1055.06), "0.0009478133944988911");
    }

    #[test]
    fn test_float_tie_rounds_up() {
        // 1234.5678 Terabytes in Bytes; exactly ...835.25 in binary
        assert_eq!(format_float(1357421651377835.25), "1357421651377835.3");
    }

    #[test]
    fn test_float_scientific() {
        assert_eq!(format_float(1e-6), "1e-06");
        assert_eq!(format_float(1.0 / 3_600_000.0), "2.7777777777777776e-07");
        assert_eq!(format_float(1.0 / (1024.0 * 1024.0 * 1024.0)), "9.313225746154785e-10");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(-2.5e20), "-2.5e+20");
    }

    #[test]
    fn test_float_non_finite() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_operand() {
        assert_eq!(format_operand(5.0), "5");
        assert_eq!(format_operand(1000.0), "1000");
        assert_eq!(format_operand(0.001), "0.001");
        assert_eq!(format_operand(1e-6), "1e-06");
        assert_eq!(format_operand(2.5), "2.5");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(format_fixed(22.0462, 2), "22.05");
        assert_eq!(format_fixed(1024.0, 2), "1024.00");
        assert_eq!(format_fixed(1.0, 0), "1");
    }
}
