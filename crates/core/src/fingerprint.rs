use chrono::NaiveDate;

use super::money::Money;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over the UTF-8 bytes of `s`.
///
/// Deliberately specified rather than using the standard hasher: identity
/// strings and palette indices must be byte-for-byte reproducible across
/// runs and across reimplementations.
pub fn fnv1a_32(s: &str) -> u32 {
    s.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Content-derived transaction identity.
///
/// Hashes `date|amount|description` and the description alone, concatenating
/// the two hex digests. The independent description digest keeps rows that
/// share a date and amount but differ in description from colliding, which
/// is the failure mode that matters for statement-scale dedup.
pub fn transaction_id(date: NaiveDate, money: Money, description: &str) -> String {
    let description = description.trim();
    let composite = format!(
        "{}|{:.2}|{}",
        date.format("%Y-%m-%d"),
        money.as_decimal(),
        description
    );
    format!("{:08x}{:08x}", fnv1a_32(&composite), fnv1a_32(description))
}

/// Stable palette slot for a category name. Same string, same slot, every run.
pub fn palette_index(name: &str, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    fnv1a_32(name) as usize % palette_len
}
