//! Text reports printed by the command line programs.
use crate::dataframe::Series;
use crate::network::NeuralNet;
use crate::stats;
use anyhow::Result;
use std::fmt::Write;

/// Mean, median, mode and quartiles of one column, as printed by `csv-stats`.
pub fn column_summary(col: &Series) -> Result<String> {
    let values = col.floats();
    let (mode_val, mode_count) = stats::mode(&values);
    let mut out = String::new();
    writeln!(
        out,
        "Mean: {:.6}, Median: {:.6}, Mode value: {:.6}, Mode count: {:.6}\n",
        col.mean()?,
        col.median()?,
        mode_val,
        mode_count as f64
    )?;
    for (label, p) in [("25", 0.25), ("50", 0.5), ("75", 0.75)] {
        writeln!(out, "{} quantile: {:.6}", label, stats::quantile(p, &values)?)?;
    }
    Ok(out)
}

/// Print model summary
pub fn print_model_summary(net: &NeuralNet) {
    println!("Model Summary:\n{}", net);
}

/// Print a confusion matrix with one row per true class.
pub fn print_confusion_matrix(cm: &[Vec<usize>]) {
    println!("\nConfusion Matrix (rows = true class):");
    for (i, row) in cm.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|c| format!("{:>5}", c)).collect();
        println!("| {} | {} |", i, cells.join(" "));
    }
}
