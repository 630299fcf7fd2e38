//! A small column-oriented table loaded from CSV.
use crate::stats;
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, Writer};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Number of rows shown by the `Display` preview.
const PREVIEW_ROWS: usize = 10;

/// Column values: numeric when every cell parses as `f64`, strings otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Float(Vec<f64>),
    String(Vec<String>),
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Values,
}

impl Series {
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: Values::Float(values),
        }
    }

    pub fn string(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: Values::String(values),
        }
    }

    /// Build a column from raw cells, inferring its type.
    fn infer(name: String, cells: Vec<String>) -> Self {
        let parsed: Option<Vec<f64>> = cells.iter().map(|c| c.trim().parse().ok()).collect();
        match parsed {
            Some(v) if !cells.is_empty() => Self::float(name, v),
            _ => Self::string(name, cells),
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            Values::Float(v) => v.len(),
            Values::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.values, Values::Float(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self.values {
            Values::Float(_) => "float",
            Values::String(_) => "string",
        }
    }

    /// Values as `f64`; string cells that do not parse become NaN.
    pub fn floats(&self) -> Vec<f64> {
        match &self.values {
            Values::Float(v) => v.clone(),
            Values::String(v) => v
                .iter()
                .map(|s| s.trim().parse().unwrap_or(f64::NAN))
                .collect(),
        }
    }

    /// Cell rendered as text, as written to CSV.
    pub fn cell(&self, row: usize) -> String {
        match &self.values {
            Values::Float(v) => v[row].to_string(),
            Values::String(v) => v[row].clone(),
        }
    }

    fn take(&self, rows: &[usize]) -> Self {
        let values = match &self.values {
            Values::Float(v) => Values::Float(rows.iter().map(|&r| v[r]).collect()),
            Values::String(v) => Values::String(rows.iter().map(|&r| v[r].clone()).collect()),
        };
        Self {
            name: self.name.clone(),
            values,
        }
    }

    pub fn mean(&self) -> Result<f64> {
        stats::mean(&self.floats())
    }

    pub fn median(&self) -> Result<f64> {
        stats::median(&self.floats())
    }
}

/// Ordered set of equally long named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<Series>,
}

impl DataFrame {
    pub fn new(columns: Vec<Series>) -> Result<Self> {
        if let Some(first) = columns.first() {
            if let Some(bad) = columns.iter().find(|c| c.len() != first.len()) {
                return Err(anyhow!(
                    "column {} has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    first.len()
                ));
            }
        }
        Ok(Self { columns })
    }

    /// Read CSV with a header row; every record must match the header's width.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let names: Vec<String> = rdr
            .headers()
            .context("CSV header error")?
            .iter()
            .map(str::to_string)
            .collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for result in rdr.records() {
            let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
            for (col, field) in cells.iter_mut().zip(record.iter()) {
                col.push(field.to_string());
            }
        }
        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, col)| Series::infer(name, col))
            .collect();
        Self::new(columns)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("can't open {}", path.display()))?;
        let df = Self::read_csv(file).with_context(|| format!("reading {}", path.display()))?;
        debug!(path = %path.display(), rows = df.nrow(), cols = df.ncol(), "loaded CSV");
        Ok(df)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(self.names())?;
        for row in 0..self.nrow() {
            wtr.write_record(self.columns.iter().map(|c| c.cell(row)))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("can't create {}", path.display()))?;
        self.write_csv(file)
            .with_context(|| format!("can't write {}", path.display()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn nrow(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    pub fn col(&self, name: &str) -> Result<&Series> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| anyhow!("unknown column {:?}", name))
    }

    /// New frame holding `rows`, in the given order.
    pub fn subset(&self, rows: &[usize]) -> Result<Self> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.nrow()) {
            return Err(anyhow!("row {} out of range ({} rows)", bad, self.nrow()));
        }
        Ok(Self {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        })
    }

    /// Summary statistics: a `column` label column followed by one column per
    /// source column.
    pub fn describe(&self) -> Result<Self> {
        let labels = ["mean", "median", "stddev", "min", "25%", "50%", "75%", "max"];
        let mut out = vec![Series::string(
            "column",
            labels.iter().map(|s| s.to_string()).collect(),
        )];
        for c in &self.columns {
            let described = match &c.values {
                Values::Float(v) if !c.is_empty() => Series::float(
                    c.name.clone(),
                    vec![
                        stats::mean(v)?,
                        stats::median(v)?,
                        stats::std_dev(v),
                        stats::min(v),
                        stats::quantile(0.25, v)?,
                        stats::quantile(0.5, v)?,
                        stats::quantile(0.75, v)?,
                        stats::max(v),
                    ],
                ),
                Values::Float(_) => Series::string(c.name.clone(), vec!["-".into(); labels.len()]),
                Values::String(v) => {
                    let lo = v.iter().min().cloned().unwrap_or_else(|| "-".into());
                    let hi = v.iter().max().cloned().unwrap_or_else(|| "-".into());
                    let mut cells = vec!["-".to_string(); labels.len()];
                    cells[3] = lo;
                    cells[7] = hi;
                    Series::string(c.name.clone(), cells)
                }
            };
            out.push(described);
        }
        Self::new(out)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.nrow().min(PREVIEW_ROWS);
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(shown + 2);
        grid.push(self.columns.iter().map(|c| c.name.clone()).collect());
        for row in 0..shown {
            grid.push(
                self.columns
                    .iter()
                    .map(|c| match &c.values {
                        Values::Float(v) => format!("{:.6}", v[row]),
                        Values::String(v) => v[row].clone(),
                    })
                    .collect(),
            );
        }
        if shown < self.nrow() {
            grid.push(vec!["...".to_string(); self.ncol()]);
        }
        grid.push(
            self.columns
                .iter()
                .map(|c| format!("<{}>", c.type_name()))
                .collect(),
        );
        let widths: Vec<usize> = (0..self.ncol())
            .map(|i| grid.iter().map(|r| r[i].len()).max().unwrap_or(0))
            .collect();

        writeln!(f, "[{}x{}] DataFrame", self.nrow(), self.ncol())?;
        writeln!(f)?;
        for row in grid {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
                .collect();
            writeln!(f, "    {}", line.join(" ").trim_end())?;
        }
        Ok(())
    }
}
