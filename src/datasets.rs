//! Loading of network training matrices from CSV.
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use ndarray::Array2;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Input features paired with one-hot labels, one example per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub inputs: Array2<f64>,
    pub labels: Array2<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split CSV records into an input matrix (first `n_inputs` fields) and a
/// label matrix (the remaining `n_labels` fields). The header row is skipped
/// and every record must have exactly `n_inputs + n_labels` numeric fields.
pub fn read_inputs_and_labels<R: Read>(
    reader: R,
    n_inputs: usize,
    n_labels: usize,
) -> Result<Dataset> {
    let width = n_inputs + n_labels;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut inputs = Vec::new();
    let mut labels = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
        if record.len() != width {
            return Err(anyhow!(
                "record {} has {} fields, expected {}",
                idx + 1,
                record.len(),
                width
            ));
        }
        for (i, field) in record.iter().enumerate() {
            let value: f64 = field
                .trim()
                .parse()
                .with_context(|| format!("record {} field {}: {:?}", idx + 1, i, field))?;
            if i < n_inputs {
                inputs.push(value);
            } else {
                labels.push(value);
            }
        }
    }
    let rows = inputs.len() / n_inputs.max(1);
    Ok(Dataset {
        inputs: Array2::from_shape_vec((rows, n_inputs), inputs)?,
        labels: Array2::from_shape_vec((rows, n_labels), labels)?,
    })
}

/// Open `path` and load it with [`read_inputs_and_labels`].
pub fn load_inputs_and_labels(
    path: impl AsRef<Path>,
    n_inputs: usize,
    n_labels: usize,
) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;
    let dataset = read_inputs_and_labels(file, n_inputs, n_labels)
        .with_context(|| format!("loading {}", path.display()))?;
    info!(path = %path.display(), rows = dataset.len(), "loaded dataset");
    Ok(dataset)
}
