//! Integer number theory helpers

use num_traits::PrimInt;

pub fn gcd<T: PrimInt>(mut a: T, mut b: T) -> T {
    while b != T::zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

pub fn lcm<T: PrimInt>(a: T, b: T) -> T {
    if a == T::zero() || b == T::zero() {
        return T::zero();
    }
    a / gcd(a, b) * b
}

/// Modular inverse of `a` modulo `m`, if `gcd(a, m) == 1`
pub fn mod_inverse(a: i128, m: i128) -> Option<i128> {
    let (mut old_r, mut r) = (a.rem_euclid(m), m);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    (old_r == 1).then(|| old_s.rem_euclid(m))
}

/// Combine congruences `x ≡ r (mod m)` with pairwise coprime moduli.
///
/// Returns `(x, M)` with `0 <= x < M` and `M` the product of the moduli.
pub fn chinese_remainder(congruences: &[(i128, i128)]) -> Option<(i128, i128)> {
    congruences
        .iter()
        .try_fold((0i128, 1i128), |(x, modulus), &(r, m)| {
            let inv = mod_inverse(modulus, m)?;
            // x + modulus * k ≡ r (mod m)
            let k = ((r - x).rem_euclid(m) * inv).rem_euclid(m);
            let combined = modulus * m;
            Some(((x + modulus * k).rem_euclid(combined), combined))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(48u64, 18), 6);
        assert_eq!(gcd(7i64, 0), 7);
        assert_eq!(lcm(4u64, 6), 12);
        assert_eq!(lcm(0u32, 5), 0);
        assert_eq!([3u64, 4, 5].into_iter().fold(1, lcm), 60);
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(3, 11), Some(4));
        assert_eq!(mod_inverse(-3, 11), Some(7));
        assert_eq!(mod_inverse(6, 9), None);
    }

    #[test]
    fn test_chinese_remainder() {
        assert_eq!(chinese_remainder(&[(2, 3), (3, 5), (2, 7)]), Some((23, 105)));
        assert_eq!(chinese_remainder(&[]), Some((0, 1)));
        assert_eq!(chinese_remainder(&[(1, 4), (1, 6)]), None);
    }
}
