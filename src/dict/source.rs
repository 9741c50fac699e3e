//! Plain-text word list and corpus sources.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a text source for line-by-line reading. Paths ending in `.gz` are
/// gunzipped transparently.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;

    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Attach `path` to a read error raised while consuming an opened source.
pub fn with_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Read(source) => Error::io(path, source),
        other => other,
    }
}

/// Call `f` for every whitespace-separated token, line by line.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; such
/// characters are dropped by sanitizing anyway.
pub fn for_each_token<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        for token in String::from_utf8_lossy(&line).split_whitespace() {
            f(token);
        }
    }
}
