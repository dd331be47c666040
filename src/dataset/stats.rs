//! Descriptive statistics for the dashboard (EDA).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dataset::types::{parse_numeric, ColumnKind, Dataset};

/// How many top values to report per text column.
const TOP_VALUES: usize = 5;

/// Summary of a numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    /// Sample standard deviation; 0.0 when fewer than two values.
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summary of a text column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub distinct: usize,
    /// Most frequent values, ordered by count descending then value.
    pub top: Vec<TopValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

/// Full dataset profile returned by the EDA endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
}

/// Profile every column of a dataset.
pub fn profile(dataset: &Dataset) -> DatasetProfile {
    let kinds = dataset.column_kinds();
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();

    for (col, header) in dataset.headers().iter().enumerate() {
        let cells: Vec<Option<&str>> = dataset
            .rows()
            .iter()
            .map(|row| row[col].as_deref())
            .collect();
        let missing = cells.iter().filter(|c| c.is_none()).count();

        match kinds[col] {
            ColumnKind::Numeric => {
                let mut values: Vec<f64> = cells
                    .iter()
                    .copied()
                    .flatten()
                    .filter_map(parse_numeric)
                    .collect();
                values.sort_by(f64::total_cmp);
                numeric.push(summarize_numeric(header, &values, missing));
            }
            ColumnKind::Text => {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for cell in cells.iter().copied().flatten() {
                    *counts.entry(cell).or_default() += 1;
                }
                let distinct = counts.len();
                let mut top: Vec<TopValue> = counts
                    .into_iter()
                    .map(|(value, count)| TopValue {
                        value: value.to_string(),
                        count,
                    })
                    .collect();
                top.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));
                top.truncate(TOP_VALUES);
                categorical.push(CategoricalSummary {
                    column: header.clone(),
                    count: cells.len() - missing,
                    missing,
                    distinct,
                    top,
                });
            }
        }
    }

    DatasetProfile {
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        numeric,
        categorical,
    }
}

fn summarize_numeric(column: &str, sorted: &[f64], missing: usize) -> NumericSummary {
    let count = sorted.len();
    if count == 0 {
        return NumericSummary {
            column: column.to_string(),
            count: 0,
            missing,
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
            max: 0.0,
        };
    }

    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };

    NumericSummary {
        column: column.to_string(),
        count,
        missing,
        mean,
        std,
        min: sorted[0],
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linearly interpolated quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::read_csv;

    #[test]
    fn test_numeric_summary() {
        let ds = read_csv("x\n1\n2\n3\n4\n".as_bytes()).unwrap();
        let p = profile(&ds);
        assert_eq!(p.numeric.len(), 1);
        let s = &p.numeric[0];
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.q3, 3.25);
        // Sample std of 1..4
        assert!((s.std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_missing_values_counted() {
        let ds = read_csv("x,y\n1,a\n,b\n3,c\n".as_bytes()).unwrap();
        let p = profile(&ds);
        let s = &p.numeric[0];
        assert_eq!(s.count, 2);
        assert_eq!(s.missing, 1);
        assert_eq!(s.mean, 2.0);
    }

    #[test]
    fn test_categorical_top_values() {
        let ds = read_csv("region\nnorth\nsouth\nnorth\neast\nnorth\n".as_bytes()).unwrap();
        let p = profile(&ds);
        assert_eq!(p.categorical.len(), 1);
        let s = &p.categorical[0];
        assert_eq!(s.distinct, 3);
        assert_eq!(s.top[0].value, "north");
        assert_eq!(s.top[0].count, 3);
        // Ties broken by value
        assert_eq!(s.top[1].value, "east");
    }

    #[test]
    fn test_single_value_column() {
        let ds = read_csv("x\n7\n".as_bytes()).unwrap();
        let s = &profile(&ds).numeric[0];
        assert_eq!(s.std, 0.0);
        assert_eq!(s.q1, 7.0);
        assert_eq!(s.q3, 7.0);
    }

    #[test]
    fn test_mixed_dataset_profile() {
        let ds = read_csv(
            "product,qty,price\nwidget,10,1.5\ngadget,3,9.99\nwidget,5,2.0\n".as_bytes(),
        )
        .unwrap();
        let p = profile(&ds);
        assert_eq!(p.row_count, 3);
        assert_eq!(p.column_count, 3);
        assert_eq!(p.numeric.len(), 2);
        assert_eq!(p.categorical.len(), 1);
    }
}
