//! Diagnostics history storage for the statedge CLI

mod io;
mod paths;

pub use io::{append_jsonl, read_jsonl};
pub use paths::{Paths, HOME_ENV};
