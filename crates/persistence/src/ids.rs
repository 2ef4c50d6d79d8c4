// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document identifier minting.
//!
//! Purchases, tickets, and events get opaque string identifiers so they can
//! be referenced from outside the database (QR payloads, API routes)
//! independently of row ids. Identifiers are minted inside the transaction
//! that inserts the document, so an aborted transaction leaks nothing.

const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints a fresh document identifier with the given prefix.
pub(crate) fn new_doc_id(prefix: &str) -> String {
    format!("{prefix}-{:016x}", rand::random::<u64>())
}

/// Mints the random four-character base-36 suffix of a ticket code.
pub(crate) fn new_code_suffix() -> String {
    let mut value: u64 = rand::random::<u64>();
    let mut suffix: String = String::with_capacity(4);
    for _ in 0..4 {
        let index: usize = usize::try_from(value % 36).unwrap_or(0);
        suffix.push(char::from(CODE_ALPHABET[index]));
        value /= 36;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_carries_prefix() {
        let id = new_doc_id("purchase");
        assert!(id.starts_with("purchase-"));
        assert_eq!(id.len(), "purchase-".len() + 16);
    }

    #[test]
    fn test_doc_ids_are_unique() {
        let a = new_doc_id("tkt");
        let b = new_doc_id("tkt");
        assert_ne!(a, b);
    }

    #[test]
    fn test_code_suffix_is_four_base36_chars() {
        let suffix = new_code_suffix();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
