//! Filesystem helpers built on `cap-std` and `camino`.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Read a UTF-8 file into a string using ambient authority.
pub(crate) fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
