//! Domain Services
//!
//! Pure domain logic: mock ledger references and display formatting.

use chrono::NaiveDate;
use rand::Rng;

use crate::domain::value_objects::LedgerRefs;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random characters after the `0x` / `Qm` prefix
pub const REF_BODY_LEN: usize = 26;

/// Characters of a transaction reference shown before the ellipsis
pub const SHORT_REF_LEN: usize = 10;

pub const TRANSACTION_REF_PREFIX: &str = "0x";
pub const CONTENT_REF_PREFIX: &str = "Qm";

/// `len` random base-36 characters
pub fn random_base36<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}

/// Hash-shaped references for a simulated issuance
pub fn mock_ledger_refs() -> LedgerRefs {
    let mut rng = rand::rng();
    LedgerRefs {
        transaction_ref: format!(
            "{}{}",
            TRANSACTION_REF_PREFIX,
            random_base36(&mut rng, REF_BODY_LEN)
        ),
        content_ref: format!(
            "{}{}",
            CONTENT_REF_PREFIX,
            random_base36(&mut rng, REF_BODY_LEN)
        ),
    }
}

/// First [`SHORT_REF_LEN`] characters followed by `...`
pub fn short_ref(reference: &str) -> String {
    let head: String = reference.chars().take(SHORT_REF_LEN).collect();
    format!("{}...", head)
}

/// `Jan 15, 2024`
pub fn format_activity_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `issuer-export-2024-01-15.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("issuer-export-{}.json", date.format("%Y-%m-%d"))
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
