use crate::error::SheetMapperError;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// A seekable byte source for a spreadsheet package.
///
/// ZIP archives need random access, so a forward-only stream is buffered into
/// memory while a local file is read in place.
pub enum SourceReader {
    /// Local file reader
    Local(BufReader<File>),
    /// In-memory buffer
    Memory(Cursor<Vec<u8>>),
}

impl SourceReader {
    /// Opens a local file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SourceReader, SheetMapperError> {
        let file = File::open(path)?;
        Ok(SourceReader::Local(BufReader::new(file)))
    }

    /// Drains a readable stream into memory
    pub fn from_reader<R: Read>(mut reader: R) -> Result<SourceReader, SheetMapperError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(SourceReader::Memory(Cursor::new(bytes)))
    }
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            SourceReader::Local(reader) => reader.read(buf),
            SourceReader::Memory(reader) => reader.read(buf),
        }
    }
}

impl Seek for SourceReader {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            SourceReader::Local(reader) => reader.seek(pos),
            SourceReader::Memory(reader) => reader.seek(pos),
        }
    }
}
