/// [Reflected binary Gray code][gray-code] of `n`.
///
/// ```text
/// n -> n ^ (n >> 1)
/// ```
///
/// [gray-code]: https://en.wikipedia.org/wiki/Gray_code
pub fn gray(n: u32) -> u32 {
    n ^ (n >> 1)
}

/// The `2^bits` Gray codes in sequence order.
///
/// Consecutive entries, including the last and the first, differ in one bit.
pub fn gray_sequence(bits: u32) -> Vec<u32> {
    (0..1u32 << bits).map(gray).collect()
}

/// Bit `index` of a `width`-bit value, counting from the most significant bit.
///
/// Bits above the 32 stored ones read as zero.
pub fn msb_bit(value: u32, width: usize, index: usize) -> bool {
    let shift = u32::try_from(width - 1 - index).unwrap_or(u32::MAX);
    value.checked_shr(shift).is_some_and(|v| v & 1 == 1)
}

/// Whether `n` is a power of two (zero is not).
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray() {
        // n     0  1  2  3  4  5  6  7
        // gray  0  1  3  2  6  7  5  4
        assert_eq!(gray_sequence(3), vec![0, 1, 3, 2, 6, 7, 5, 4]);
        assert_eq!(gray_sequence(1), vec![0, 1]);
        assert_eq!(gray_sequence(0), vec![0]);
    }

    #[test]
    fn test_gray_adjacency() {
        for bits in 1..=4 {
            let seq = gray_sequence(bits);
            for i in 0..seq.len() {
                let next = seq[(i + 1) % seq.len()];
                assert_eq!((seq[i] ^ next).count_ones(), 1, "bits = {}, i = {}", bits, i);
            }
        }
    }

    #[test]
    fn test_msb_bit() {
        // 0b110 over 3 bits: A=1, B=1, C=0
        assert!(msb_bit(0b110, 3, 0));
        assert!(msb_bit(0b110, 3, 1));
        assert!(!msb_bit(0b110, 3, 2));
    }

    #[test]
    fn test_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(8));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(6));
    }
}
