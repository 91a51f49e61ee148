//! Limb-level helpers shared by the field and scalar implementations.

use crate::FieldBytes;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
/// The borrow is always `0` or `1`.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (ret as u64, (ret >> 127) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Adds two little-endian 256-bit integers, returning the sum and the carry bit.
#[inline(always)]
pub(crate) const fn add4(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, carry) = adc(a[0], b[0], 0);
    let (r1, carry) = adc(a[1], b[1], carry);
    let (r2, carry) = adc(a[2], b[2], carry);
    let (r3, carry) = adc(a[3], b[3], carry);
    ([r0, r1, r2, r3], carry)
}

/// Subtracts two little-endian 256-bit integers, returning the difference and the
/// borrow bit.
#[inline(always)]
pub(crate) const fn sub4(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, borrow) = sbb(a[0], b[0], 0);
    let (r1, borrow) = sbb(a[1], b[1], borrow);
    let (r2, borrow) = sbb(a[2], b[2], borrow);
    let (r3, borrow) = sbb(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Returns `a` if `mask == 0` and `b` if `mask == u64::MAX`.
#[inline(always)]
pub(crate) const fn select4(a: &[u64; 4], b: &[u64; 4], mask: u64) -> [u64; 4] {
    [
        a[0] ^ (mask & (a[0] ^ b[0])),
        a[1] ^ (mask & (a[1] ^ b[1])),
        a[2] ^ (mask & (a[2] ^ b[2])),
        a[3] ^ (mask & (a[3] ^ b[3])),
    ]
}

/// Computes `a + b mod m` for `a, b < m`.
#[inline(always)]
pub(crate) const fn add_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (sum, carry) = add4(a, b);
    let (reduced, borrow) = sub4(&sum, m);

    // The unreduced sum is kept only if it did not overflow and is below m.
    let keep_sum = borrow & (carry ^ 1);
    select4(&reduced, &sum, 0u64.wrapping_sub(keep_sum))
}

/// Computes `a - b mod m` for `a, b < m`.
#[inline(always)]
pub(crate) const fn sub_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (diff, borrow) = sub4(a, b);
    let mask = 0u64.wrapping_sub(borrow);
    let modulus = [m[0] & mask, m[1] & mask, m[2] & mask, m[3] & mask];
    add4(&diff, &modulus).0
}

/// Full 256 x 256 -> 512 bit schoolbook multiplication.
#[inline(always)]
pub(crate) const fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut w = [0u64; 8];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (lo, hi) = mac(w[i + j], a[i], b[j], carry);
            w[i + j] = lo;
            carry = hi;
            j += 1;
        }
        w[i + 4] = carry;
        i += 1;
    }
    w
}

/// Decodes a big-endian 32-byte integer into little-endian limbs.
#[inline(always)]
pub(crate) const fn limbs_from_be_bytes(bytes: &[u8]) -> [u64; 4] {
    debug_assert!(bytes.len() == 32);

    let mut limbs = [0u64; 4];
    let mut i = 0;
    while i < 4 {
        let mut limb = 0u64;
        let mut j = 0;
        while j < 8 {
            limb = (limb << 8) | (bytes[(3 - i) * 8 + j] as u64);
            j += 1;
        }
        limbs[i] = limb;
        i += 1;
    }
    limbs
}

/// Encodes little-endian limbs as a big-endian 32-byte integer.
#[inline(always)]
pub(crate) fn limbs_to_be_bytes(limbs: &[u64; 4]) -> FieldBytes {
    let mut ret = FieldBytes::default();
    ret[0..8].copy_from_slice(&limbs[3].to_be_bytes());
    ret[8..16].copy_from_slice(&limbs[2].to_be_bytes());
    ret[16..24].copy_from_slice(&limbs[1].to_be_bytes());
    ret[24..32].copy_from_slice(&limbs[0].to_be_bytes());
    ret
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::FieldBytes;
    use num_bigint::BigUint;

    /// Converts a big-endian byte string to a `BigUint`.
    pub fn bytes_to_biguint(bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes)
    }

    /// Converts a `BigUint` smaller than 2^256 to big-endian field bytes.
    pub fn biguint_to_bytes(x: &BigUint) -> FieldBytes {
        let digits = x.to_bytes_be();
        assert!(digits.len() <= 32);
        let mut bytes = FieldBytes::default();
        bytes[32 - digits.len()..].copy_from_slice(&digits);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_mod, add4, limbs_from_be_bytes, limbs_to_be_bytes, mul_wide, sbb, select4, sub_mod,
        sub4,
    };
    use hex_literal::hex;

    #[test]
    fn sbb_borrow_is_single_bit() {
        assert_eq!(sbb(0, 1, 0), (u64::MAX, 1));
        assert_eq!(sbb(5, 2, 1), (2, 0));
        assert_eq!(sbb(0, u64::MAX, 1), (0, 1));
    }

    #[test]
    fn add_sub_carry() {
        let max = [u64::MAX; 4];
        let (sum, carry) = add4(&max, &[1, 0, 0, 0]);
        assert_eq!(sum, [0; 4]);
        assert_eq!(carry, 1);

        let (diff, borrow) = sub4(&[0; 4], &[1, 0, 0, 0]);
        assert_eq!(diff, max);
        assert_eq!(borrow, 1);
    }

    #[test]
    fn select_by_mask() {
        let a = [1, 2, 3, 4];
        let b = [5, 6, 7, 8];
        assert_eq!(select4(&a, &b, 0), a);
        assert_eq!(select4(&a, &b, u64::MAX), b);
    }

    #[test]
    fn modular_add_sub() {
        let m = [13, 0, 0, 0];
        assert_eq!(add_mod(&[7, 0, 0, 0], &[8, 0, 0, 0], &m), [2, 0, 0, 0]);
        assert_eq!(add_mod(&[6, 0, 0, 0], &[6, 0, 0, 0], &m), [12, 0, 0, 0]);
        assert_eq!(sub_mod(&[3, 0, 0, 0], &[5, 0, 0, 0], &m), [11, 0, 0, 0]);
        assert_eq!(sub_mod(&[5, 0, 0, 0], &[5, 0, 0, 0], &m), [0; 4]);

        // Sums that overflow 2^256 still reduce.
        let m = [u64::MAX - 1, u64::MAX, u64::MAX, u64::MAX];
        let a = [u64::MAX - 2, u64::MAX, u64::MAX, u64::MAX];
        assert_eq!(add_mod(&a, &a, &m), [u64::MAX - 3, u64::MAX, u64::MAX, u64::MAX]);
    }

    #[test]
    fn wide_square_of_max() {
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let w = mul_wide(&[u64::MAX; 4], &[u64::MAX; 4]);
        assert_eq!(
            w,
            [1, 0, 0, 0, u64::MAX - 1, u64::MAX, u64::MAX, u64::MAX]
        );
    }

    #[test]
    fn byte_order() {
        let bytes = hex!("0102030405060708 1112131415161718 2122232425262728 3132333435363738");
        let limbs = limbs_from_be_bytes(&bytes);
        assert_eq!(limbs[3], 0x0102030405060708);
        assert_eq!(limbs[0], 0x3132333435363738);
        assert_eq!(limbs_to_be_bytes(&limbs).as_slice(), &bytes);
    }
}
