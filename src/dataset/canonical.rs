//! Canonical serialization for hashing.
//!
//! The digest must be independent of presentation order: reordering the
//! columns or rows of a CSV file does not change its content. Columns
//! are reordered by ascending header name, rows are sorted by every
//! column in that order (numeric columns compare numerically, missing
//! cells sort last), and the result is written back out as CSV.

use std::cmp::Ordering;

use crate::dataset::types::{parse_numeric, ColumnKind, Dataset};

/// Serialize a dataset into canonical CSV bytes.
pub fn canonical_bytes(dataset: &Dataset) -> Vec<u8> {
    // Column permutation: ascending header name.
    let mut column_order: Vec<usize> = (0..dataset.column_count()).collect();
    column_order.sort_by(|&a, &b| dataset.headers()[a].cmp(&dataset.headers()[b]));

    let kinds = dataset.column_kinds();

    // Row permutation: lexicographic over the reordered columns.
    let mut row_order: Vec<usize> = (0..dataset.row_count()).collect();
    row_order.sort_by(|&a, &b| compare_rows(dataset, &column_order, &kinds, a, b));

    let mut writer = csv::Writer::from_writer(Vec::new());
    let headers: Vec<&str> = column_order
        .iter()
        .map(|&c| dataset.headers()[c].as_str())
        .collect();
    // Writing into a Vec cannot fail
    writer.write_record(&headers).expect("in-memory write");

    for &r in &row_order {
        let record: Vec<&str> = column_order
            .iter()
            .map(|&c| dataset.cell(r, c).unwrap_or(""))
            .collect();
        writer.write_record(&record).expect("in-memory write");
    }

    writer.into_inner().expect("in-memory flush")
}

fn compare_rows(
    dataset: &Dataset,
    column_order: &[usize],
    kinds: &[ColumnKind],
    a: usize,
    b: usize,
) -> Ordering {
    for &col in column_order {
        let left = dataset.cell(a, col);
        let right = dataset.cell(b, col);
        let ord = compare_cells(left, right, kinds[col]);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_cells(left: Option<&str>, right: Option<&str>, kind: ColumnKind) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        // Missing cells sort last
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => match kind {
            ColumnKind::Numeric => match (parse_numeric(l), parse_numeric(r)) {
                (Some(lv), Some(rv)) => lv.total_cmp(&rv),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => l.cmp(r),
            },
            ColumnKind::Text => l.cmp(r),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::read_csv;

    #[test]
    fn test_column_order_does_not_matter() {
        let a = read_csv("qty,name\n10,widget\n3,gadget\n".as_bytes()).unwrap();
        let b = read_csv("name,qty\nwidget,10\ngadget,3\n".as_bytes()).unwrap();
        assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let a = read_csv("name,qty\nwidget,10\ngadget,3\n".as_bytes()).unwrap();
        let b = read_csv("name,qty\ngadget,3\nwidget,10\n".as_bytes()).unwrap();
        assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
    }

    #[test]
    fn test_cell_change_changes_bytes() {
        let a = read_csv("name,qty\nwidget,10\n".as_bytes()).unwrap();
        let b = read_csv("name,qty\nwidget,11\n".as_bytes()).unwrap();
        assert_ne!(canonical_bytes(&a), canonical_bytes(&b));
    }

    #[test]
    fn test_numeric_rows_sort_numerically() {
        // String order would put "9" after "10"
        let ds = read_csv("qty\n10\n9\n".as_bytes()).unwrap();
        let bytes = canonical_bytes(&ds);
        assert_eq!(String::from_utf8(bytes).unwrap(), "qty\n9\n10\n");
    }

    #[test]
    fn test_missing_cells_sort_last() {
        let ds = read_csv("amount,note\n,x\n5,y\n".as_bytes()).unwrap();
        let bytes = canonical_bytes(&ds);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "amount,note\n5,y\n,x\n"
        );
    }

    #[test]
    fn test_header_only_dataset() {
        let ds = read_csv("b,a\n".as_bytes()).unwrap();
        let bytes = canonical_bytes(&ds);
        assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n");
    }
}
