// src/eco.rs
// ECO codes are a category letter A..E followed by two digits ("B45").

/// The five dataset categories, in fetch order.
pub const CATEGORIES: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

/// Upper-cased category letter of a well-formed code (A..E and two digits).
pub fn eco_letter(eco: &str) -> Option<char> {
    let b = eco.trim().as_bytes();
    match b {
        [l, d1, d2] if d1.is_ascii_digit() && d2.is_ascii_digit() => {
            let l = l.to_ascii_uppercase();
            (b'A'..=b'E').contains(&l).then_some(l as char)
        }
        _ => None,
    }
}

/// Category key of an ECO code: its leading letter ("B45" -> "B").
/// Malformed codes fall back to their first character so no record is dropped.
pub fn category_of(eco: &str) -> String {
    match eco_letter(eco) {
        Some(l) => l.to_string(),
        None => eco.trim().chars().take(1).collect(),
    }
}
