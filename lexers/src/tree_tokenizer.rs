#![deny(warnings)]

use crate::char_scanner::unquote;
use crate::scanner::Scanner;
use std::str::Chars;


/// Tokens of a bracketed tree literal: python tuples, json arrays or
/// penn-style s-expressions all lex to the same stream.
#[derive(Clone, PartialEq, Debug)]
pub enum TreeToken {
    Open,
    Close,
    Comma,
    // penn-style bare word, quotes and commas included (eg: don't, 's, 1,000)
    Atom(String),
    // quoted string with its escapes resolved
    Quoted(String),
}

// chars that end a bare atom
static BARE_END: &[char] = &[' ', '\n', '\r', '\t', '(', ')', '[', ']'];
// a closing quote must be followed by one of these to end a string
static QUOTED_END: &[char] = &[' ', '\n', '\r', '\t', ')', ']', ','];

/// Yields `(offset, token)` pairs, offset being the char index in the source.
pub struct TreeTokenizer<I: Iterator<Item=char>> {
    src: Scanner<I>,
    // commas only separate after a quoted atom or a closing bracket
    separable: bool,
}

impl<'a> TreeTokenizer<Chars<'a>> {
    pub fn scanner(source: &'a str) -> Scanner<TreeTokenizer<Chars<'a>>> {
        Scanner::new(TreeTokenizer{src: Scanner::new(source.chars()), separable: false})
    }
}

impl<I: Iterator<Item=char>> Iterator for TreeTokenizer<I> {
    type Item = (usize, TreeToken);
    fn next(&mut self) -> Option<Self::Item> {
        let s = &mut self.src;
        s.skip_whitespace();
        let offset = s.offset();
        let separable = std::mem::replace(&mut self.separable, false);
        if let Some(c) = s.accept_any(&['(', '[', ')', ']']) {
            s.ignore();
            if c == '(' || c == '[' {
                return Some((offset, TreeToken::Open));
            }
            self.separable = true;
            return Some((offset, TreeToken::Close));
        }
        if separable && s.accept(&',').is_some() {
            s.ignore();
            return Some((offset, TreeToken::Comma));
        }
        for q in ['\'', '"'] {
            if !s.accept_quoted(q) {
                continue;
            }
            // empty or glued quotes are penn tokens like '' or words like 's
            let ended = s.peek().map_or(true, |c| QUOTED_END.contains(&c));
            if ended && s.view().len() > 2 {
                self.separable = true;
                return Some((offset, TreeToken::Quoted(unquote(&s.extract_string()))));
            }
            s.set_pos(-1);
        }
        s.scan_until(BARE_END).map(|atom| (offset, TreeToken::Atom(atom)))
    }
}

///////////////////////////////////////////////////////////////////////////////
