//! Ordered train/test partitioning of a table.
use crate::dataframe::DataFrame;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Number of training rows for `total` rows: `floor(4/5 * total)`.
pub fn training_count(total: usize) -> usize {
    total * 4 / 5
}

/// Split `df` into its first `floor(4/5 * n)` rows and the remaining rows.
/// Row order is preserved in both halves.
pub fn train_test_split(df: &DataFrame) -> Result<(DataFrame, DataFrame)> {
    let total = df.nrow();
    let train = training_count(total);
    let training_ids: Vec<usize> = (0..train).collect();
    let test_ids: Vec<usize> = (train..total).collect();
    Ok((df.subset(&training_ids)?, df.subset(&test_ids)?))
}

/// Write `df` as CSV to `path`.
pub fn export(path: impl AsRef<Path>, df: &DataFrame) -> Result<()> {
    let path = path.as_ref();
    df.to_path(path)?;
    info!(path = %path.display(), rows = df.nrow(), "exported subset");
    Ok(())
}

/// Split `df` and write the halves to `<out_dir>/training.csv` and
/// `<out_dir>/test.csv`.
pub fn export_split(df: &DataFrame, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let (training, test) = train_test_split(df)?;
    let training_path = out_dir.join("training.csv");
    let test_path = out_dir.join("test.csv");
    export(&training_path, &training)?;
    export(&test_path, &test)?;
    Ok((training_path, test_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataframe::Series;
    use proptest::prelude::*;

    fn numbered(n: usize) -> DataFrame {
        DataFrame::new(vec![Series::float("id", (0..n).map(|i| i as f64).collect())]).unwrap()
    }

    #[test]
    fn ten_rows_split_eight_two() {
        let (train, test) = train_test_split(&numbered(10)).unwrap();
        assert_eq!(train.nrow(), 8);
        assert_eq!(test.nrow(), 2);
        assert_eq!(test.col("id").unwrap().floats(), vec![8.0, 9.0]);
    }

    #[test]
    fn tiny_tables() {
        let (train, test) = train_test_split(&numbered(1)).unwrap();
        assert_eq!((train.nrow(), test.nrow()), (0, 1));
        let (train, test) = train_test_split(&numbered(0)).unwrap();
        assert_eq!((train.nrow(), test.nrow()), (0, 0));
    }

    proptest! {
        #[test]
        fn halves_partition_rows_in_order(n in 0usize..500) {
            let (train, test) = train_test_split(&numbered(n)).unwrap();
            prop_assert_eq!(train.nrow(), n * 4 / 5);
            prop_assert_eq!(train.nrow() + test.nrow(), n);
            let mut joined = train.col("id").unwrap().floats();
            joined.extend(test.col("id").unwrap().floats());
            let expected: Vec<f64> = (0..n).map(|i| i as f64).collect();
            prop_assert_eq!(joined, expected);
        }
    }
}
