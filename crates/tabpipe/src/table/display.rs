/* -----------------------------------------------------------------------------
Table and Series Display implementations
----------------------------------------------------------------------------- */

// dependencies
use std::fmt::{Display, Formatter};
use super::Table;
use super::series::Series;

// write one cell padded to width, truncating with an ellipsis
fn write_cell(f: &mut Formatter, value: &str, width: usize) -> std::fmt::Result {
    if value.chars().count() > width {
        let kept: String = value.chars().take(width.saturating_sub(1)).collect();
        write!(f, "{kept}… ")
    } else {
        write!(f, "{value:width$} ")
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let n_show = self.n_row.min(self.print_max_rows);

        // calculate column widths based on column labels and data, with the
        // row index as an unlabeled first column
        let index_width = self.index[..n_show]
            .iter()
            .map(|label| label.to_string().len())
            .max()
            .unwrap_or(0);
        let mut widths: Vec<usize>  = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        for (name, col) in self.iter_columns() {
            let label = format!("{} <{}>", name, col.dtype());
            let mut width = label.chars().count();
            for i in 0..n_show {
                width = width.max(col.cell_string(i, "NA").chars().count());
            }
            widths.push(width.min(self.print_max_col_width));
            labels.push(label);
        }

        // write header including table dimensions, column labels, and separator
        writeln!(f, "\nTable: {} rows × {} columns", self.n_row, self.n_col())?;
        write!(f, "{:index_width$} ", "")?;
        for (label, width) in labels.iter().zip(&widths) {
            write_cell(f, label, *width)?;
        }
        writeln!(f)?;
        write!(f, "{:index_width$} ", "")?;
        for width in &widths {
            write!(f, "{:-<width$} ", "")?;
        }
        writeln!(f)?;

        // write data rows
        for i in 0..n_show {
            write!(f, "{:<index_width$} ", self.index[i])?;
            for ((_, col), width) in self.iter_columns().zip(&widths) {
                write_cell(f, &col.cell_string(i, "NA"), *width)?;
            }
            writeln!(f)?;
        }

        // show ellipsis if more rows exist
        if self.n_row > self.print_max_rows { writeln!(f, "...")?; }
        Ok(())
    }
}

impl Display for Series {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let index_width = self.index()
            .iter()
            .map(|label| label.to_string().len())
            .max()
            .unwrap_or(0);
        for (i, label) in self.index().iter().enumerate() {
            writeln!(f, "{:<index_width$} {}", label, self.column().cell_string(i, "NA"))?;
        }
        write!(f, "Name: {}, Length: {}, dtype: {}", self.name(), self.len(), self.dtype())
    }
}
