use crate::helpers::ensure;
use crate::types::Z;
use crate::Q;


/// Algorithm 4 `ByteEncode<d>(F)` on page 19.
/// Encodes an array of d-bit integers into a byte array, for 1 ≤ d ≤ 12.
///
/// Input: integer array `F ∈ Z^256_m`, where `m = 2^d if d < 12` and `m = q if d = 12` <br>
/// Output: byte array B ∈ B^{32d}
///
/// Every coefficient handed to this function already came from this crate's own
/// arithmetic (NTT, CBD sampling, compression) and is therefore always canonical,
/// so unlike `byte_decode` this direction cannot observe an out-of-range value.
pub(crate) fn byte_encode(d: u32, integers_f: &[Z; 256], bytes_b: &mut [u8]) {
    debug_assert_eq!(bytes_b.len(), 32 * d as usize, "Alg4: byte length not 32 * d");
    let mut temp = 0u64;
    let mut bit_index = 0;
    let mut byte_index = 0;
    for coeff in integers_f {
        let coeff = u64::from(coeff.get_u16()) & (2u64.pow(d) - 1);
        temp |= coeff << bit_index;
        bit_index += d as usize;
        while bit_index > 7 {
            bytes_b[byte_index] = temp as u8;
            temp >>= 8;
            byte_index += 1;
            bit_index -= 8;
        }
    }
}


/// Algorithm 5 `ByteDecode<d>(B)` on page 19.
/// Decodes a byte array into an array of d-bit integers, for 1 ≤ d ≤ 12.
///
/// Input: byte array B ∈ B^{32d} <br>
/// Output: integer array `F ∈ Z^256_m`, where `m = 2^d if d < 12` and `m = q if d = 12`
///
/// Decoded coefficients ARE validated against the modulus: any value `>= m` —
/// in particular any 12-bit value in `[q, 4096)` arriving from an untrusted
/// encapsulation or decapsulation key — is rejected rather than silently kept
/// (see DESIGN.md Open Question 1).
pub(crate) fn byte_decode(d: u32, bytes_b: &[u8]) -> Result<[Z; 256], &'static str> {
    debug_assert_eq!(bytes_b.len(), 32 * d as usize, "Alg5: byte length not 32 * d");
    let mut integers_f = [Z::default(); 256];
    let mut temp = 0u64;
    let mut int_index = 0;
    let mut bit_index = 0;
    for byte in bytes_b {
        temp |= u64::from(*byte) << bit_index;
        bit_index += 8;
        while bit_index >= d as usize {
            let tmask = temp & (2u64.pow(d) - 1);
            integers_f[int_index].set_u16(tmask as u16);
            bit_index -= d as usize;
            temp >>= d;
            int_index += 1;
        }
    }
    let max = if d < 12 { 2u16.pow(d) } else { Q as u16 };
    ensure!(integers_f.iter().all(|e| e.get_u16() < max), "Alg5: integers out of range");
    Ok(integers_f)
}
