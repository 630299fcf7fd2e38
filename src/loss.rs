//! Loss measured while training; the update rule itself follows the raw error.
use ndarray::Array2;

/// Mean squared error over every element of the two matrices.
pub fn mse_loss(pred: &Array2<f64>, target: &Array2<f64>) -> f64 {
    if pred.dim() != target.dim() {
        panic!("Pred and target size mismatch");
    }
    if pred.is_empty() {
        return 0.0;
    }
    (pred - target).mapv(|d| d * d).sum() / pred.len() as f64
}
