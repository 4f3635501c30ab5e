//! Wrappers to help open and read/write delimited input/output files
//! identified by their environment variable keys or as file paths.
//!
//! Files whose path ends in `.gz` are transparently gzip-decoded on input
//! and gzip-encoded on output.

// dependencies
use std::fs::File;
use std::io::{Read, Write};
use csv::{Reader, ReaderBuilder, Writer, WriterBuilder};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use crate::error::{Error, Result};
use crate::workflow::Config;

/// An InputFile supports reading records from delimited text files.
pub struct InputFile {
    pub filepath: String,
    reader:       Reader<Box<dyn Read>>,
}
impl InputFile {
    /* ------------------------------------------------------------------
    reader opening
    ------------------------------------------------------------------ */
    /// Open a reader for an input file whose path is provided as the value
    /// of an environment variable key.
    pub fn open_env(cfg: &mut Config, key: &str, delimiter: u8) -> Result<Self> {
        cfg.set_string_env(&[key])?;
        let filepath = cfg.get_string(key)?.to_string();
        Self::open(&filepath, delimiter)
    }
    /// Open a reader for an input file at a filepath. All lines, including
    /// any header line, are returned as records.
    pub fn open(filepath: &str, delimiter: u8) -> Result<Self> {
        let file = File::open(filepath).map_err(|source| Error::Io {
            path: filepath.to_string(),
            source,
        })?;
        let reader: Box<dyn Read> = if filepath.ends_with(".gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let reader = ReaderBuilder::new()
            .has_headers(false) // false since callers interpret the header themselves
            .delimiter(delimiter)
            .from_reader(reader);
        Ok(Self {
            filepath: filepath.to_string(),
            reader,
        })
    }
    /* ------------------------------------------------------------------
    reading from file
    ------------------------------------------------------------------ */
    /// Return an iterator over the records in the input file.
    pub fn records(&mut self) -> csv::StringRecordsIter<'_, Box<dyn Read>> {
        self.reader.records()
    }
}

/// An OutputFile supports writing records to delimited text files.
pub struct OutputFile {
    pub filepath: String,
    writer:       Writer<Box<dyn Write>>,
}
impl OutputFile {
    /* ------------------------------------------------------------------
    writer opening
    ------------------------------------------------------------------ */
    /// Open a writer for an output file at a filepath.
    pub fn open(filepath: &str, delimiter: u8) -> Result<Self> {
        let file = File::create(filepath).map_err(|source| Error::Io {
            path: filepath.to_string(),
            source,
        })?;
        let writer: Box<dyn Write> = if filepath.ends_with(".gz") {
            Box::new(GzEncoder::new(file, Compression::default()))
        } else {
            Box::new(file)
        };
        let writer = WriterBuilder::new()
            .has_headers(false) // false since callers write the header themselves
            .delimiter(delimiter)
            .from_writer(writer);
        Ok(Self {
            filepath: filepath.to_string(),
            writer,
        })
    }
    /* ------------------------------------------------------------------
    writing to file
    ------------------------------------------------------------------ */
    /// Write one record to the output file.
    pub fn write_record(&mut self, record: &[String]) -> Result<()> {
        self.writer.write_record(record)?;
        Ok(())
    }
    /// Flush all buffered data to the file; dropping the OutputFile then
    /// closes it, finishing any gzip stream.
    pub fn close(mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Io {
            path: self.filepath.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gz_files_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rows.csv.gz");
        let path = path.to_string_lossy().to_string();
        let mut output = OutputFile::open(&path, b',').expect("create");
        output.write_record(&["a".to_string(), "b".to_string()]).expect("write");
        output.close().expect("close");
        let mut input = InputFile::open(&path, b',').expect("open");
        let records: Vec<csv::StringRecord> = input.records().collect::<std::result::Result<_, _>>().expect("read");
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][1], "b");
    }

    #[test]
    fn inputs_open_from_environment_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "a,b\n1,2\n").expect("write");
        // SAFETY: the key is used by this test only
        unsafe { std::env::set_var("TABPIPE_TEST_INPUT_CSV", &path) };
        let mut cfg = Config::new();
        let mut input = InputFile::open_env(&mut cfg, "TABPIPE_TEST_INPUT_CSV", b',').expect("open");
        assert_eq!(input.records().count(), 2);
        assert_eq!(cfg.get_string("TABPIPE_TEST_INPUT_CSV").expect("set"), path.to_string_lossy());
        let err = InputFile::open_env(&mut cfg, "TABPIPE_TEST_UNSET_CSV", b',');
        assert!(matches!(err, Err(Error::Config { .. })));
    }

    #[test]
    fn missing_input_is_an_io_error() {
        assert!(matches!(InputFile::open("/no/such/file.csv", b','), Err(Error::Io { .. })));
    }
}
