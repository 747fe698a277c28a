//! Fixed permutation table shared by the gradient noise generators.
//!
//! The table is Ken Perlin's reference permutation of `0..=255`, doubled to
//! 512 entries at compile time so that `perm(i + j)` never needs a modulo for
//! `i, j < 256`. It is never regenerated: reseeding it would make every noise
//! value irreproducible.

/// The canonical 256-entry permutation.
pub const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186,
    3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206, 59,
    227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163, 70,
    221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178,
    185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241, 81,
    51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204, 176, 115,
    121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141, 128, 195,
    78, 66, 215, 61, 156, 180,
];

/// Length of the doubled lookup table.
pub const TABLE_SIZE: usize = 512;

const fn doubled() -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    let mut i = 0;
    while i < TABLE_SIZE {
        table[i] = PERMUTATION[i & 255];
        i += 1;
    }
    table
}

/// Permutation table doubled for wrap-free indexing.
pub static P: [u8; TABLE_SIZE] = doubled();

/// Look up the permutation value at `index`, masked into `[0, 511]`.
#[inline]
pub fn perm(index: usize) -> usize {
    P[index & (TABLE_SIZE - 1)] as usize
}

/// Look up `perm(index) % 12`, the 3D simplex gradient index.
#[inline]
pub fn perm_mod12(index: usize) -> usize {
    perm(index) % 12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_is_a_permutation() {
        let mut seen = [false; 256];
        for &v in PERMUTATION.iter() {
            assert!(!seen[v as usize], "duplicate value {}", v);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_table_is_doubled() {
        for i in 0..256 {
            assert_eq!(P[i], P[i + 256]);
            assert_eq!(P[i], PERMUTATION[i]);
        }
    }

    #[test]
    fn test_lookup_masks_large_indices() {
        assert_eq!(perm(0), perm(512));
        assert_eq!(perm(3), perm(512 * 7 + 3));
        assert_eq!(perm(usize::MAX), P[511] as usize);
    }

    #[test]
    fn test_mod12_range() {
        for i in 0..TABLE_SIZE {
            assert!(perm_mod12(i) < 12);
        }
    }
}
