#![deny(warnings)]

use crate::scanner::Scanner;
use std::str::Chars;

static WHITE: &[char] = &[' ', '\n', '\r', '\t'];


impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    /// Skip and drop whitespace, returns if anything was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        let skipped = self.skip_all(WHITE);
        self.ignore();
        skipped
    }

    // advance over a quoted string like "this is \"an\" example" (quotes
    // included), backtracks and returns false if the string isn't closed
    pub fn accept_quoted(&mut self, q: char) -> bool {
        let backtrack = self.pos();
        if self.accept(&q).is_none() {
            return false;
        }
        while let Some(n) = self.next() {
            if n == '\\' { self.next(); continue; }
            if n == q { return true; }
        }
        self.set_pos(backtrack);
        false
    }

    // scan anything up to a char in 'delims' or EOF
    pub fn scan_until(&mut self, delims: &[char]) -> Option<String> {
        match self.until_any(delims) {
            true => Some(self.extract_string()),
            false => None,
        }
    }
}

// 4 hex digits of a \u escape
fn hex4(chars: &mut Chars) -> Option<u32> {
    let hex: String = chars.take(4).collect();
    match hex.len() {
        4 => u32::from_str_radix(&hex, 16).ok(),
        _ => None,
    }
}

// code point of a \u escape, astral chars come as a surrogate pair
fn unicode_escape(chars: &mut Chars) -> Option<char> {
    let code = hex4(chars)?;
    if !(0xD800..0xDC00).contains(&code) {
        return char::from_u32(code);
    }
    if chars.next()? != '\\' || chars.next()? != 'u' {
        return None;
    }
    let low = hex4(chars)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
}

/// Strip surrounding quotes and resolve backslash escapes, json's included.
/// Broken `\u` escapes decode to U+FFFD.
pub fn unquote(quoted: &str) -> String {
    let mut chars = quoted.chars();
    chars.next();
    chars.next_back();
    let mut out = String::new();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => out.push(unicode_escape(&mut chars).unwrap_or('\u{fffd}')),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

///////////////////////////////////////////////////////////////////////////////
