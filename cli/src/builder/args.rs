//! # Argument Normalization (`builder::args`)
//!
//! File: cli/src/builder/args.rs
//!
//! ## Overview
//!
//! Every builder entry point (construction, `append`, `prepend`, `opt`) accepts
//! loosely shaped input and flattens it into an ordered list of tokens:
//!
//! - a sequence of strings (array, slice, `Vec`) is taken as-is, in order;
//! - a single string is split on single spaces (`"git status"` → `["git", "status"]`);
//! - no input (`()` or `None`) yields nothing.
//!
//! Splitting is deliberately naive: repeated spaces produce empty tokens and no
//! quoting rules apply. Use a sequence when a token must contain a space.
//!
//! `parse_variadic` covers the loose-argument form used by the `ketch` binary:
//! several inputs are kept as they are, one input is split, none yields nothing.
//!

/// Conversion of call-time input into a flat token list.
pub trait IntoTokens {
    fn into_tokens(self) -> Vec<String>;
}

impl IntoTokens for () {
    fn into_tokens(self) -> Vec<String> {
        Vec::new()
    }
}

impl IntoTokens for &str {
    fn into_tokens(self) -> Vec<String> {
        split_spaces(self)
    }
}

impl IntoTokens for String {
    fn into_tokens(self) -> Vec<String> {
        split_spaces(&self)
    }
}

impl IntoTokens for &String {
    fn into_tokens(self) -> Vec<String> {
        split_spaces(self)
    }
}

impl<T: IntoTokens> IntoTokens for Option<T> {
    fn into_tokens(self) -> Vec<String> {
        self.map(IntoTokens::into_tokens).unwrap_or_default()
    }
}

impl<S: AsRef<str>, const N: usize> IntoTokens for [S; N] {
    fn into_tokens(self) -> Vec<String> {
        collect(self.iter())
    }
}

impl<S: AsRef<str>> IntoTokens for &[S] {
    fn into_tokens(self) -> Vec<String> {
        collect(self.iter())
    }
}

impl<S: AsRef<str>, const N: usize> IntoTokens for &[S; N] {
    fn into_tokens(self) -> Vec<String> {
        collect(self.iter())
    }
}

impl<S: AsRef<str>> IntoTokens for Vec<S> {
    fn into_tokens(self) -> Vec<String> {
        collect(self.iter())
    }
}

impl<S: AsRef<str>> IntoTokens for &Vec<S> {
    fn into_tokens(self) -> Vec<String> {
        collect(self.iter())
    }
}

/// Normalizes `input` into a fresh token list.
pub fn parse_args<I: IntoTokens>(input: I) -> Vec<String> {
    input.into_tokens()
}

/// Normalizes a list of loose inputs: many are kept, one is split, none is empty.
pub fn parse_variadic<S: AsRef<str>>(inputs: &[S]) -> Vec<String> {
    match inputs {
        [] => Vec::new(),
        [single] => split_spaces(single.as_ref()),
        many => collect(many.iter()),
    }
}

/// Maps a bare option name to its flag form: `v` → `-v`, `verbose` → `--verbose`.
///
/// Length is counted in chars, so a single multi-byte character is a short flag.
pub fn to_flag(name: &str) -> String {
    if name.chars().count() > 1 {
        format!("--{name}")
    } else {
        format!("-{name}")
    }
}

fn split_spaces(s: &str) -> Vec<String> {
    s.split(' ').map(str::to_string).collect()
}

fn collect<'a, S: AsRef<str> + 'a>(items: impl Iterator<Item = &'a S>) -> Vec<String> {
    items.map(|s| s.as_ref().to_string()).collect()
}
