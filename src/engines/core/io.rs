//! Buffered I/O for sequence files
//!
//! Thin wrappers around `BufReader`/`BufWriter` that the FASTA parser and
//! writer are built on, with per-process byte counters reported at the end
//! of a run.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

// Default buffer sizes
const DEFAULT_READ_BUFFER_SIZE: usize = 1024 * 1024; // 1MB
const DEFAULT_WRITE_BUFFER_SIZE: usize = 1024 * 1024; // 1MB

static TOTAL_BYTES_READ: AtomicUsize = AtomicUsize::new(0);
static TOTAL_BYTES_WRITTEN: AtomicUsize = AtomicUsize::new(0);

/// Buffered file reader
pub struct FastReader {
    reader: BufReader<File>,
    path: String,
}

impl FastReader {
    /// Open `path` for reading with the given buffer size (1MB by default)
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let buf_size = buffer_size.unwrap_or(DEFAULT_READ_BUFFER_SIZE);

        Ok(Self {
            reader: BufReader::with_capacity(buf_size, file),
            path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    /// Read the remainder of the file into a string
    pub fn read_to_string(&mut self) -> io::Result<String> {
        let mut buffer = String::new();
        let bytes_read = self.reader.read_to_string(&mut buffer)?;
        TOTAL_BYTES_READ.fetch_add(bytes_read, Ordering::Relaxed);
        Ok(buffer)
    }

    /// Iterate over the lines of the file, line endings stripped
    pub fn read_lines(&mut self) -> Lines<'_> {
        Lines {
            reader: &mut self.reader,
            buffer: String::new(),
        }
    }

    /// Path of the file being read
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Iterator over lines in a file
pub struct Lines<'a> {
    reader: &'a mut BufReader<File>,
    buffer: String,
}

impl<'a> Iterator for Lines<'a> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(bytes) => {
                TOTAL_BYTES_READ.fetch_add(bytes, Ordering::Relaxed);

                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }

                Some(Ok(self.buffer.clone()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Buffered file writer, truncating any existing file
pub struct FastWriter {
    writer: BufWriter<File>,
    path: String,
}

impl FastWriter {
    /// Create (or truncate) `path` for writing
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;

        let buf_size = buffer_size.unwrap_or(DEFAULT_WRITE_BUFFER_SIZE);

        Ok(Self {
            writer: BufWriter::with_capacity(buf_size, file),
            path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    /// Write raw bytes
    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        TOTAL_BYTES_WRITTEN.fetch_add(data.len(), Ordering::Relaxed);
        Ok(())
    }

    /// Write a line, appending `\n`
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write(line.as_bytes())?;
        self.write(b"\n")
    }

    /// Flush buffered data to disk
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Path of the file being written
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Bytes read and written through `FastReader`/`FastWriter` so far
pub fn get_io_stats() -> (usize, usize) {
    (
        TOTAL_BYTES_READ.load(Ordering::Relaxed),
        TOTAL_BYTES_WRITTEN.load(Ordering::Relaxed),
    )
}
