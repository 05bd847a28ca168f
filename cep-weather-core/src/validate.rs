/// Number of digits in a Brazilian postal code (CEP).
pub const POSTAL_CODE_LEN: usize = 8;

/// Syntactic CEP check: exactly eight ASCII digits, nothing else.
///
/// The code is not checked against any registry; that is the address
/// provider's job.
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == POSTAL_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
