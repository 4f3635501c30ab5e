//! Table input and output: loading delimited text with per-column type
//! inference, exporting back to delimited text, and exporting to a JSON
//! dictionary keyed by column name and row index label.

// dependencies
use std::io::{Read, Write};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::Table;
use super::column::Column;
use crate::error::{Error, Result};
use crate::workflow::file::{InputFile, OutputFile};

/* -----------------------------------------------------------------------------
loader and exporter options
----------------------------------------------------------------------------- */
/// Options controlling how delimited text is read into a Table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadOptions {
    pub delimiter:    u8,
    pub has_header:   bool,
    /// Cell texts read as the missing marker.
    pub na_values:    Vec<String>,
    /// chrono formats tried, in order, when inferring and parsing dates.
    pub date_formats: Vec<String>,
    pub trim:         bool,
}
impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter:    b',',
            has_header:   true,
            na_values:    ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "#N/A"]
                .iter().map(|s| s.to_string()).collect(),
            date_formats: ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"]
                .iter().map(|s| s.to_string()).collect(),
            trim:         true,
        }
    }
}
impl ReadOptions {
    /// Whether a cell text is a missing marker.
    pub fn is_na(&self, s: &str) -> bool {
        self.na_values.iter().any(|na| na == s)
    }
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }
    pub fn with_date_formats(mut self, formats: &[&str]) -> Self {
        self.date_formats = formats.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Options controlling how a Table is written as delimited text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOptions {
    pub delimiter:   u8,
    pub header:      bool,
    /// Write row index labels as a leading, unnamed column.
    pub write_index: bool,
}
impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter:   b',',
            header:      true,
            write_index: false,
        }
    }
}

/* -----------------------------------------------------------------------------
Table loading
----------------------------------------------------------------------------- */
impl Table {
    /// Read a comma-delimited file with a header row; `.gz` files are decompressed.
    pub fn read_csv(filepath: &str) -> Result<Table> {
        Table::read_csv_with(filepath, &ReadOptions::default())
    }
    /// Read a delimited file with caller-defined options.
    pub fn read_csv_with(filepath: &str, opts: &ReadOptions) -> Result<Table> {
        let mut input = InputFile::open(filepath, opts.delimiter)?;
        Table::from_records(input.records(), filepath, opts)
    }
    /// Read delimited text from any reader; `source_name` is used in error messages.
    pub fn read<R: Read>(reader: R, source_name: &str, opts: &ReadOptions) -> Result<Table> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false) // false since we read the header ourselves
            .delimiter(opts.delimiter)
            .from_reader(reader);
        Table::from_records(rdr.records(), source_name, opts)
    }
    // gather text cells column-wise, then parse and type all columns in parallel
    fn from_records(
        records:     impl Iterator<Item = csv::Result<StringRecord>>,
        source_name: &str,
        opts:        &ReadOptions,
    ) -> Result<Table> {
        let mut header: Option<Vec<String>> = None;
        let mut cells: Vec<Vec<String>> = Vec::new();
        for record in records {
            let record = record.map_err(|e| Error::from_csv_read(e, source_name))?;
            let fields = record.iter().map(|s| if opts.trim { s.trim() } else { s });
            if opts.has_header && header.is_none() {
                header = Some(fields.map(str::to_string).collect());
                continue;
            }
            if cells.is_empty() {
                cells = vec![Vec::new(); record.len()];
            }
            for (j, field) in fields.enumerate() {
                cells[j].push(field.to_string());
            }
        }
        let n_col = header.as_ref().map_or(cells.len(), Vec::len);
        if cells.is_empty() {
            cells = vec![Vec::new(); n_col];
        }
        let names = column_names(header, n_col);
        let columns: Vec<Column> = cells.par_iter().map(|c| Column::parse(c, opts)).collect();
        Table::from_columns(names.into_iter().zip(columns).collect())
    }
}

// name columns from a header row: blank names become "Unnamed: j" and
// repeated names are made unique with a ".k" suffix
fn column_names(header: Option<Vec<String>>, n_col: usize) -> Vec<String> {
    let Some(header) = header else {
        return (0..n_col).map(|j| format!("column_{j}")).collect();
    };
    let mut names: Vec<String> = Vec::with_capacity(n_col);
    for (j, name) in header.into_iter().enumerate() {
        let base = if name.is_empty() { format!("Unnamed: {j}") } else { name };
        let mut name = base.clone();
        let mut k = 1;
        while names.contains(&name) {
            name = format!("{base}.{k}");
            k += 1;
        }
        names.push(name);
    }
    names
}

/* -----------------------------------------------------------------------------
Table export
----------------------------------------------------------------------------- */
impl Table {
    /// Write the Table to a comma-delimited file with a header row; `.gz`
    /// paths are compressed.
    pub fn write_csv(&self, filepath: &str) -> Result<()> {
        self.write_csv_with(filepath, &WriteOptions::default())
    }
    /// Write the Table to a delimited file with caller-defined options.
    pub fn write_csv_with(&self, filepath: &str, opts: &WriteOptions) -> Result<()> {
        let mut output = OutputFile::open(filepath, opts.delimiter)?;
        self.for_each_record(opts, |record| output.write_record(&record))?;
        output.close()
    }
    /// Write the Table as delimited text to any writer.
    pub fn write<W: Write>(&self, writer: W, opts: &WriteOptions) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .delimiter(opts.delimiter)
            .from_writer(writer);
        self.for_each_record(opts, |record| Ok(wtr.write_record(&record)?))?;
        wtr.flush().map_err(|source| Error::Io { path: "<writer>".to_string(), source })
    }
    /// Return the Table as comma-delimited text.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        self.write(&mut buf, &WriteOptions::default())?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
    // serialize the header and data rows, missing cells as empty fields
    fn for_each_record(
        &self,
        opts:  &WriteOptions,
        mut f: impl FnMut(Vec<String>) -> Result<()>,
    ) -> Result<()> {
        if opts.header {
            let mut record: Vec<String> = Vec::with_capacity(self.n_col() + 1);
            if opts.write_index { record.push(String::new()); }
            record.extend(self.col_names.iter().cloned());
            f(record)?;
        }
        let cols: Vec<&Column> = self.iter_columns().map(|(_, col)| col).collect();
        for i in 0..self.n_row {
            let mut record: Vec<String> = Vec::with_capacity(cols.len() + 1);
            if opts.write_index { record.push(self.index[i].to_string()); }
            record.extend(cols.iter().map(|col| col.cell_string(i, "")));
            f(record)?;
        }
        Ok(())
    }
    /// Export as a JSON object of column name => {row index label => value},
    /// with missing cells as null.
    pub fn to_dict(&self) -> Result<Value> {
        let mut dict = Map::new();
        for (name, col) in self.iter_columns() {
            let mut values = Map::new();
            for (i, label) in self.index.iter().enumerate() {
                values.insert(label.to_string(), serde_json::to_value(col.get(i))?);
            }
            dict.insert(name.clone(), Value::Object(values));
        }
        Ok(Value::Object(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::types::{DataType, Scalar};

    fn read_str(data: &str) -> Result<Table> {
        Table::read(data.as_bytes(), "inline", &ReadOptions::default())
    }

    #[test]
    fn loader_infers_types_per_column() {
        let df = read_str("day,temp,condition,hot\nMonday,12,Sunny,false\nSunday,24.5,,true\n")
            .expect("valid csv");
        let dtypes: Vec<DataType> = df.iter_columns().map(|(_, c)| c.dtype()).collect();
        assert_eq!(dtypes, vec![DataType::String, DataType::Float, DataType::String, DataType::Boolean]);
        assert_eq!(df.cell("condition", 1).expect("cell"), Scalar::Missing);
    }

    #[test]
    fn loader_rejects_ragged_rows() {
        let err = read_str("a,b\n1,2\n3\n").expect_err("ragged rows");
        assert!(matches!(err, Error::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn headerless_files_get_positional_names() {
        let opts = ReadOptions::default().without_header().with_delimiter(b'\t');
        let df = Table::read("1\ta\n2\tb\n".as_bytes(), "inline", &opts).expect("valid tsv");
        assert_eq!(df.columns(), &["column_0", "column_1"]);
        assert_eq!(df.n_row(), 2);
        assert_eq!(df.cell("column_0", 1).expect("cell"), Scalar::Integer(2));
    }

    #[test]
    fn header_only_file_gives_empty_float_columns() {
        let df = read_str("a,b\n").expect("header only");
        assert_eq!(df.shape(), (0, 2));
        assert_eq!(df.get_column("test", "a").expect("col").dtype(), DataType::Float);
    }

    #[test]
    fn blank_and_repeated_headers_are_renamed() {
        let df = read_str(",x,x\n0,1,2\n").expect("valid csv");
        assert_eq!(df.columns(), &["Unnamed: 0", "x", "x.1"]);
    }

    #[test]
    fn export_writes_missing_as_empty_fields() {
        let df = Table::from_columns(vec![
            ("name", Column::from(vec![Some("a"), None])),
            ("value", Column::Float(vec![Some(46000.0), None])),
        ]).expect("table");
        assert_eq!(df.to_csv_string().expect("csv"), "name,value\na,46000.0\n,\n");
        let mut buf = Vec::new();
        let opts = WriteOptions { write_index: true, ..WriteOptions::default() };
        df.write(&mut buf, &opts).expect("write");
        assert!(String::from_utf8_lossy(&buf).starts_with(",name,value\n0,a,46000.0\n"));
    }

    #[test]
    fn to_dict_keys_by_index_label() {
        let df = read_str("day,temp\nMonday,12\nSunday,\n").expect("valid csv");
        let dict = df.to_dict().expect("json");
        assert_eq!(dict["day"]["1"], Value::from("Sunday"));
        assert_eq!(dict["temp"]["0"], Value::from(12));
        assert!(dict["temp"]["1"].is_null());
    }
}
