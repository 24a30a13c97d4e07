#![deny(warnings)]

use crate::error::Error;
use crate::vocab::WordSet;


/// Replace words outside `vocabulary` with `sentinel`.
/// Returns the tokens to parse and the replaced words in sentence order.
pub fn substitute<S: AsRef<str>>(words: &[S], vocabulary: &WordSet, sentinel: &str)
        -> (Vec<String>, Vec<String>) {
    let mut replaced = Vec::new();
    let tokens = words.iter().map(|w| {
        let w = w.as_ref();
        match vocabulary.contains(w) {
            true => w.to_string(),
            false => {
                replaced.push(w.to_string());
                sentinel.to_string()
            }
        }
    }).collect();
    (tokens, replaced)
}

/// Put `replaced` words back into serialized json, one per occurrence of
/// `sentinel` in order. Words are escaped to remain valid json strings.
pub fn restore(json: &str, sentinel: &str, replaced: &[String]) -> Result<String, Error> {
    let found = json.matches(sentinel).count();
    if found != replaced.len() {
        return Err(Error::SentinelMismatch{found, recorded: replaced.len()});
    }
    let mut out = String::with_capacity(json.len());
    let mut rest = json;
    for word in replaced {
        let (before, after) = rest.split_once(sentinel)
            .ok_or(Error::SentinelMismatch{found, recorded: replaced.len()})?;
        let quoted = serde_json::to_string(word)?;
        out.push_str(before);
        out.push_str(&quoted[1..quoted.len() - 1]);
        rest = after;
    }
    out.push_str(rest);
    Ok(out)
}

///////////////////////////////////////////////////////////////////////////////
