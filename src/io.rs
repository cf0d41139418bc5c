//! Read and write logic networks to files
//!
//! External full adder implementations are given as .bench netlists with three inputs a, b and
//! cin, and two outputs sum and cout, in declaration order.

mod bench;
mod utils;

use std::fs::File;
use std::path::Path;

pub use bench::{read_bench, write_bench};

use crate::error::{Error, Result};
use crate::Network;

fn is_bench(path: &Path) -> bool {
    path.extension().is_some_and(|s| s == "bench")
}

/// Read a logic network from a file
///
/// Following extensions are supported: .bench
pub fn read_network_file(path: &Path) -> Result<Network> {
    if is_bench(path) {
        let f = File::open(path)?;
        read_bench(f)
    } else {
        Err(Error::UnknownExtension(path.to_path_buf()))
    }
}

/// Write a logic network to a file
///
/// Following extensions are supported: .bench
pub fn write_network_file(path: &Path, aig: &Network) -> Result<()> {
    if is_bench(path) {
        let mut f = File::create(path)?;
        write_bench(&mut f, aig)
    } else {
        Err(Error::UnknownExtension(path.to_path_buf()))
    }
}
