//! # Report output helpers.
//!
//! Reports go to `stdout` unless a file was named on the command line.

use std::{fmt, fs, io, path::PathBuf, result};

/// The text module result.
pub type Result<T> = result::Result<T, Error>;

/// The text Error that can be captured outside the module.
#[derive(Debug)]
pub struct Error(String);

/// Allow the error to be use in format!, writeln!, etc.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates an error from a String.
impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::from(error.as_str())
    }
}

/// Creates an error from a str slice.
impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error(format!("text: {error}"))
    }
}

/// Creates an error from an IO error.
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error(format!("text: {error}"))
    }
}

/// Convert the error into a String.
impl From<Error> for String {
    fn from(error: Error) -> Self {
        error.0
    }
}

/// Get the writer reports will be written to.
///
/// An error is returned if the report file cannot be opened.
///
/// # Arguments
///
/// * `file_option` is the optional report file, `stdout` is used when `None`.
/// * `append` when `true` adds to the end of an existing file, otherwise it is truncated.
pub fn get_writer(file_option: &Option<PathBuf>, append: bool) -> Result<Box<dyn io::Write>> {
    let writer = if let Some(file_path) = &file_option {
        let mut open_options = fs::OpenOptions::new();
        match append {
            true => open_options.append(true).create(true),
            false => open_options.write(true).truncate(true).create(true),
        };
        let file = open_options
            .open(file_path)
            .map_err(|err| Error::from(format!("{}: {err}", file_path.display())))?;
        Box::new(io::BufWriter::new(file)) as Box<dyn io::Write>
    } else {
        Box::new(io::stdout()) as Box<dyn io::Write>
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(file: &Option<PathBuf>, append: bool, text: &str) {
        let mut writer = get_writer(file, append).unwrap();
        writer.write_all(text.as_bytes()).unwrap();
        writer.flush().unwrap();
    }

    #[test]
    fn file_writer() {
        let dir = tempfile::tempdir().unwrap();
        let file = Some(dir.path().join("report.txt"));
        write(&file, false, "first\n");
        write(&file, true, "second\n");
        assert_eq!(fs::read_to_string(file.as_ref().unwrap()).unwrap(), "first\nsecond\n");
        write(&file, false, "third\n");
        assert_eq!(fs::read_to_string(file.as_ref().unwrap()).unwrap(), "third\n");
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = Some(dir.path().join("nope").join("report.txt"));
        let error = get_writer(&file, false).err().unwrap();
        assert!(error.to_string().starts_with("text: "));
    }
}
