//! Metrics for evaluating network predictions against one-hot labels.
use anyhow::{anyhow, Result};
use ndarray::{Array2, ArrayView1};

/// Index of the true class in a one-hot row: the first entry equal to 1, or 0.
pub fn true_class(label_row: ArrayView1<f64>) -> usize {
    label_row.iter().position(|&v| v == 1.0).unwrap_or(0)
}

/// Subset accuracy: the fraction of rows whose prediction at the true class
/// equals the row maximum.
pub fn subset_accuracy(predictions: &Array2<f64>, labels: &Array2<f64>) -> Result<f64> {
    if predictions.dim() != labels.dim() {
        return Err(anyhow!(
            "prediction shape {:?} does not match label shape {:?}",
            predictions.dim(),
            labels.dim()
        ));
    }
    if predictions.nrows() == 0 {
        return Err(anyhow!("no predictions to score"));
    }
    let correct = predictions
        .rows()
        .into_iter()
        .zip(labels.rows())
        .filter(|(pred, label)| {
            let max = pred.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            pred[true_class(label.view())] == max
        })
        .count();
    Ok(correct as f64 / predictions.nrows() as f64)
}

/// Confusion matrix indexed `[true][predicted]`, predicted being the row argmax.
pub fn confusion_matrix(predictions: &Array2<f64>, labels: &Array2<f64>) -> Vec<Vec<usize>> {
    let num_classes = labels.ncols();
    let mut cm = vec![vec![0; num_classes]; num_classes];
    for (pred, label) in predictions.rows().into_iter().zip(labels.rows()) {
        let pred_class = pred
            .iter()
            .enumerate()
            .fold(0usize, |max_i, (i, &v)| if v > pred[max_i] { i } else { max_i });
        cm[true_class(label.view())][pred_class] += 1;
    }
    cm
}
