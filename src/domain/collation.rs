// src/domain/collation.rs

//! Turkish-aware string ordering for location sorting.
//!
//! Approximates `localeCompare(a, b, "tr-TR", { sensitivity: "base",
//! numeric: true, ignorePunctuation: true })`:
//!
//! - whitespace and punctuation are ignored,
//! - case is ignored, using Turkish case mapping (`I` → `ı`, `İ` → `i`),
//! - letters follow the Turkish alphabet (`c < ç < d`, `ı < i`, ...),
//! - circumflex vowels fold onto their base letter (`â` = `a`),
//! - digit runs compare by numeric value and sort before letters.
//!
//! Letters outside the Turkish alphabet sort after it by code point. This
//! is not full CLDR collation; strings that compare equal here keep their
//! input order under a stable sort.

use std::cmp::Ordering;

const ALPHABET: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Element {
    /// Leading zeros stripped; longer runs are larger.
    Number { len: usize, digits: String },
    Letter(u32),
}

pub fn compare(a: &str, b: &str) -> Ordering {
    elements(a).cmp(&elements(b))
}

fn elements(s: &str) -> Vec<Element> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut run = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                run.push(next);
                chars.next();
            }
            let digits = run.trim_start_matches('0').to_string();
            out.push(Element::Number {
                len: digits.len(),
                digits,
            });
        } else if c.is_alphabetic() {
            out.push(Element::Letter(weight(fold(c))));
        }
    }

    out
}

fn fold(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        'Â' | 'â' => 'a',
        'Î' | 'î' => 'i',
        'Û' | 'û' => 'u',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

fn weight(c: char) -> u32 {
    match ALPHABET.chars().position(|letter| letter == c) {
        Some(pos) => pos as u32,
        None => ALPHABET.chars().count() as u32 + c as u32,
    }
}
