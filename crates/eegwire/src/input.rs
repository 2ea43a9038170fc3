use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::exit::{io_error, CliResult};

/// Open a capture for reading; `-` means stdin.
pub fn open_input(path: &Path) -> CliResult<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Read up to one chunk, retrying interrupted reads. Zero means EOF.
pub fn read_chunk(source: &mut dyn Read, chunk: &mut [u8]) -> CliResult<usize> {
    loop {
        match source.read(chunk) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(io_error("read failed", err)),
        }
    }
}
