//! GCD/LCM over possibly-fractional periods.
//!
//! Each real period is first turned into an exact fraction `p/q` in lowest
//! terms. Short terminating decimals (as printed by the shortest round-trip
//! representation) are read digit by digit; anything else, such as `1/440`
//! or `1/3`, goes through continued fractions and must land within a
//! relative `1e-14` of the value with a denominator of at most `10^6`.
//! The LCM of fractions in lowest terms is `lcm(p_i) / gcd(q_i)`.
//! A value with no such fraction, or an overflow, yields `None`.

/// Decimals with more places than this go through continued fractions.
const MAX_DECIMAL_PLACES: usize = 9;

/// Largest denominator accepted from a continued fraction expansion.
const MAX_DENOMINATOR: u128 = 1_000_000;

const RELATIVE_TOLERANCE: f64 = 1e-14;

const MAX_TERMS: usize = 64;

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple, or `None` on overflow. `lcm(0, x) == 0`.
pub fn lcm(a: u128, b: u128) -> Option<u128> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Number of digits after the decimal point in `value`'s shortest repr.
fn decimal_places(value: f64) -> usize {
    let text = format!("{}", value.abs());
    text.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/// Exactly scales `value` by `10^places`, reading its decimal digits.
fn scaled(value: f64, places: usize) -> Option<u128> {
    let text = format!("{}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let padding = places.checked_sub(frac_part.len())?;
    let digits = format!("{int_part}{frac_part}{}", "0".repeat(padding));
    digits.parse().ok()
}

/// Reduces `num / den` to lowest terms.
fn reduced(num: u128, den: u128) -> (u128, u128) {
    match gcd(num, den) {
        0 => (num, den),
        g => (num / g, den / g),
    }
}

/// Best small fraction for a non-negative `value`, via continued fractions.
fn approximate(value: f64) -> Option<(u128, u128)> {
    let (mut h_prev, mut h) = (0u128, 1u128);
    let (mut k_prev, mut k) = (1u128, 0u128);
    let mut x = value;
    for _ in 0..MAX_TERMS {
        let whole = x.floor();
        if !(0.0..=u64::MAX as f64).contains(&whole) {
            return None;
        }
        let a = whole as u128;
        let h_next = a.checked_mul(h)?.checked_add(h_prev)?;
        let k_next = a.checked_mul(k)?.checked_add(k_prev)?;
        if k_next > MAX_DENOMINATOR {
            return None;
        }
        (h_prev, h, k_prev, k) = (h, h_next, k, k_next);

        if (h as f64 / k as f64 - value).abs() <= RELATIVE_TOLERANCE * value {
            return Some((h, k));
        }
        let remainder = x - whole;
        if remainder <= 0.0 {
            return None;
        }
        x = 1.0 / remainder;
    }
    None
}

/// The magnitude of `value` as a fraction in lowest terms.
fn to_fraction(value: f64) -> Option<(u128, u128)> {
    let value = value.abs();
    let places = decimal_places(value);
    if places <= MAX_DECIMAL_PLACES {
        let den = 10u128.checked_pow(u32::try_from(places).ok()?)?;
        return Some(reduced(scaled(value, places)?, den));
    }
    approximate(value)
}

/// LCM of real values.
///
/// Returns `None` for an empty input, for non-finite values, for values with
/// no small exact fraction, or when the result overflows.
///
/// # Examples
///
/// ```
/// use harmonia::core::rational::lcm_of_reals;
///
/// assert_eq!(lcm_of_reals(&[0.5, 0.25]), Some(0.5));
/// assert_eq!(lcm_of_reals(&[2.0, 5.0]), Some(10.0));
/// assert_eq!(lcm_of_reals(&[0.2, 0.3]), Some(0.6));
/// assert_eq!(lcm_of_reals(&[1.0 / 440.0, 1.0 / 660.0]), Some(1.0 / 220.0));
/// ```
pub fn lcm_of_reals(values: &[f64]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let (mut num, mut den) = to_fraction(values[0])?;
    for &value in &values[1..] {
        let (p, q) = to_fraction(value)?;
        num = lcm(num, p)?;
        den = gcd(den, q);
    }
    Some(num as f64 / den as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(17, 5), 1);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(0, 6), Some(0));
        assert_eq!(lcm(u128::MAX, u128::MAX - 1), None);
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(2.0), 0);
        assert_eq!(decimal_places(0.25), 2);
        assert_eq!(decimal_places(-1.5), 1);
    }

    #[test]
    fn test_scaled_is_exact() {
        assert_eq!(scaled(0.1, 3), Some(100));
        assert_eq!(scaled(12.25, 2), Some(1225));
        assert_eq!(scaled(0.125, 1), None);
    }

    #[test]
    fn test_lcm_of_reals_integers() {
        assert_eq!(lcm_of_reals(&[4.0, 6.0]), Some(12.0));
        assert_eq!(lcm_of_reals(&[3.0]), Some(3.0));
    }

    #[test]
    fn test_lcm_of_reals_fractions() {
        assert_eq!(lcm_of_reals(&[0.5, 0.25]), Some(0.5));
        assert_eq!(lcm_of_reals(&[0.5, 0.2, 0.25]), Some(1.0));
    }

    #[test]
    fn test_lcm_of_reals_sign_is_ignored() {
        assert_eq!(lcm_of_reals(&[-0.5, 0.25]), Some(0.5));
    }

    #[test]
    fn test_repeating_fractions() {
        assert_eq!(to_fraction(1.0 / 3.0), Some((1, 3)));
        assert_eq!(to_fraction(1.0 / 440.0), Some((1, 440)));
        assert_eq!(to_fraction(1.0 / 261.63), Some((100, 26163)));
        assert_eq!(to_fraction(0.75), Some((3, 4)));
    }

    #[test]
    fn test_lcm_of_reals_audio_periods() {
        assert_eq!(lcm_of_reals(&[1.0 / 440.0, 1.0 / 660.0]), Some(1.0 / 220.0));
        assert_eq!(lcm_of_reals(&[1.0 / 3.0, 1.0 / 7.0]), Some(1.0));
        assert_eq!(lcm_of_reals(&[1.0 / 3.0, 0.5]), Some(1.0));
        assert_eq!(lcm_of_reals(&[1.0 / 220.0, 1.0 / 330.0, 1.0 / 440.0]), Some(1.0 / 110.0));
    }

    #[test]
    fn test_lcm_of_reals_irrational() {
        assert_eq!(lcm_of_reals(&[std::f64::consts::PI, 1.0]), None);
        assert_eq!(lcm_of_reals(&[std::f64::consts::SQRT_2 / 100.0, 0.01]), None);
    }

    #[test]
    fn test_lcm_of_reals_degenerate() {
        assert_eq!(lcm_of_reals(&[]), None);
        assert_eq!(lcm_of_reals(&[f64::NAN, 1.0]), None);
        assert_eq!(lcm_of_reals(&[1e300, 3.0]), None);
    }
}
