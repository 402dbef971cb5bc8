//! `wf-names` — search named map locations by prefix or exact name.
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`index`] | `NameIndex`, `Location`, `clean_name`, `build_name_index`  |
//! | [`trie`]  | arena character trie used by the index                     |
//!
//! Names are matched on a cleaned key (ASCII letters and spaces, lowercased),
//! so `"cafe r"` finds both `"Cafe Roma"` and `"CAFE ROMA!"`.

pub mod index;
pub mod trie;

#[cfg(test)]
mod tests;

pub use index::{Location, NameIndex, build_name_index, clean_name, exact_lookup, prefix_search};
