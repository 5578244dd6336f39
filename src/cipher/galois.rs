// GF(2^8) arithmetic and AES state helpers
// Byte-level building blocks shared by the AES round transforms

/// AES state: 4 columns of 4 bytes, `state[col][row]`
pub type State = [[u8; 4]; 4];

/// Reduction polynomial x^8 + x^4 + x^3 + x + 1 without the x^8 term
const REDUCTION: u8 = 0x1b;

/// Multiply by x (i.e. {02}) in GF(2^8)
#[inline]
pub fn xtime(a: u8) -> u8 {
    if a & 0x80 != 0 {
        (a << 1) ^ REDUCTION
    } else {
        a << 1
    }
}

/// General GF(2^8) multiplication by repeated doubling
pub fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Map 16 input bytes onto the column-major state
pub fn bytes_to_state(block: &[u8; 16]) -> State {
    let mut state = [[0u8; 4]; 4];
    for (col, column) in state.iter_mut().enumerate() {
        column.copy_from_slice(&block[col * 4..col * 4 + 4]);
    }
    state
}

/// Inverse of [`bytes_to_state`]
pub fn state_to_bytes(state: &State) -> [u8; 16] {
    let mut block = [0u8; 16];
    for (col, column) in state.iter().enumerate() {
        block[col * 4..col * 4 + 4].copy_from_slice(column);
    }
    block
}
