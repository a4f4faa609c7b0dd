//! Hex armor for template fragments.
//!
//! A fragment is pinned by hex-encoding its UTF-8 bytes and wrapping the
//! digits between [`PREFIX`] and [`SUFFIX`]. Neither the markers nor the hex
//! alphabet contain a character that HTML entity escaping or JSON string
//! escaping rewrites, so the run passes through such a layer untouched and
//! [`unpin`] can restore the original text afterwards.

use crate::error::ArmorError;
use crate::proxy::Render;
use log::debug;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

pub const PREFIX: &str = "@@@@@@@@:";
pub const SUFFIX: &str = ":########";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

static ARMORED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "{}([0-9A-Fa-f]*?){}",
        regex::escape(PREFIX),
        regex::escape(SUFFIX)
    );
    Regex::new(&pattern).expect("Invalid armored run regex")
});

/// Text that must not be escaped or rewritten before it reaches [`unpin`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pinned(String);

impl Pinned {
    /// The armored text, markers included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The text this fragment protects.
    pub fn decode(&self) -> String {
        unpin(&self.0)
    }
}

impl fmt::Display for Pinned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pinned {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Render for Pinned {
    fn render(&self) -> String {
        self.0.clone()
    }
}

impl From<Pinned> for String {
    fn from(pinned: Pinned) -> Self {
        pinned.0
    }
}

/// Armor `text` so it survives a foreign escaping pass.
pub fn pin(text: &str) -> Pinned {
    let mut armored = String::with_capacity(PREFIX.len() + text.len() * 2 + SUFFIX.len());
    armored.push_str(PREFIX);
    for byte in text.bytes() {
        armored.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        armored.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    armored.push_str(SUFFIX);
    Pinned(armored)
}

/// Replace every armored run in `text` with the text it protects.
///
/// Runs that are unterminated, carry a payload that is not hex-encoded bytes,
/// or do not decode to UTF-8 are left verbatim. Text without markers is returned unchanged.
pub fn unpin(text: impl AsRef<str>) -> String {
    let text = text.as_ref();
    ARMORED_RUN
        .replace_all(text, |caps: &Captures| {
            let run = caps.get(0).map_or("", |m| m.as_str());
            let offset = caps.get(0).map_or(0, |m| m.start());
            match decode_payload(&caps[1], offset) {
                Ok(decoded) => decoded,
                Err(err) => {
                    debug!("leaving armored run verbatim: {}", err);
                    run.to_string()
                }
            }
        })
        .into_owned()
}

/// Like [`unpin`], but fails on the first malformed armored run.
pub fn try_unpin(text: impl AsRef<str>) -> Result<String, ArmorError> {
    let text = text.as_ref();
    let mut decoded = String::with_capacity(text.len());
    let mut last = 0;

    for caps in ARMORED_RUN.captures_iter(text) {
        let Some(run) = caps.get(0) else { continue };
        check_gap(text, last, run.start())?;
        decoded.push_str(&text[last..run.start()]);
        decoded.push_str(&decode_payload(&caps[1], run.start())?);
        last = run.end();
    }

    check_gap(text, last, text.len())?;
    decoded.push_str(&text[last..]);
    Ok(decoded)
}

/// Decoded payloads of every well-formed armored run, in order.
pub fn fragments(text: &str) -> impl Iterator<Item = String> + '_ {
    ARMORED_RUN.captures_iter(text).filter_map(|caps| {
        let offset = caps.get(0).map_or(0, |m| m.start());
        decode_payload(&caps[1], offset).ok()
    })
}

/// A stray open marker between two well-formed runs. If a close marker follows
/// it before any other open marker, the payload held non-hex characters;
/// otherwise the run was never closed.
fn check_gap(text: &str, start: usize, end: usize) -> Result<(), ArmorError> {
    let gap = &text[start..end];
    let Some(pos) = gap.find(PREFIX) else {
        return Ok(());
    };
    let offset = start + pos;
    let payload = &gap[pos + PREFIX.len()..];
    let closed = match (payload.find(SUFFIX), payload.find(PREFIX)) {
        (Some(close), Some(open)) => close < open,
        (Some(_), None) => true,
        (None, _) => false,
    };
    let err = if closed {
        ArmorError::InvalidHex { offset }
    } else {
        ArmorError::Unterminated { offset }
    };
    debug!("{}", err);
    Err(err)
}

fn decode_payload(payload: &str, offset: usize) -> Result<String, ArmorError> {
    if payload.len() % 2 != 0 {
        return Err(ArmorError::InvalidHex { offset });
    }
    let bytes = payload
        .as_bytes()
        .chunks(2)
        .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect::<Option<Vec<u8>>>()
        .ok_or(ArmorError::InvalidHex { offset })?;
    String::from_utf8(bytes).map_err(|_| ArmorError::InvalidUtf8 { offset })
}

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
