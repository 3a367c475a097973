//! Integration tests for column width planning.
//!
//! These tests verify the proportional width allocation against the screen
//! width bound, and the fallback to natural widths on narrow terminals.

use squeue_explorer::column::{compute_column_widths, natural_widths};
use squeue_explorer::parser::{parse_squeue, Dataset};

/// Helper building a dataset from literal cells.
fn table(headers: &[&str], rows: &[&[&str]]) -> Dataset {
    Dataset::from_rows(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

#[test]
fn test_two_column_scenario() {
    let data = table(&["JOBID", "NAME"], &[&["123", "job1"], &["456", "job2"]]);
    let plan = compute_column_widths(&data, 20);

    // natural 5 and 4; spare 20 - 9 - 3 = 8 split as 8*5/9 and 8*4/9
    assert_eq!(plan.get("JOBID"), Some(9), "JOBID should get 4 extra columns");
    assert_eq!(plan.get("NAME"), Some(7), "NAME should get 3 extra columns");
}

#[test]
fn test_bound_holds_across_widths() {
    let data = parse_squeue(
        "JOBID PARTITION NAME USER STATE TIME TIME_LIMI NODES NODELIST(REASON)
123456 gpu train_resnet alice RUNNING 1:02:03 2:00:00 1 node017
123457 cpu preprocess alice PENDING 0:00 30:00 4 (Resources)
9 debug x bob COMPLETI 0:01 5:00 1 node001",
    );
    let natural = natural_widths(&data);
    let natural_sum: usize = natural.iter().sum();
    let needed = natural_sum + data.column_count() + 1;

    for total in 0..400 {
        let plan = compute_column_widths(&data, total);
        if total >= needed {
            assert!(
                plan.total() + data.column_count() + 1 <= total,
                "plan {:?} overflows width {}",
                plan,
                total
            );
        } else {
            assert_eq!(plan.widths(), natural, "width {} should fall back to natural", total);
        }
        for (w, n) in plan.widths().iter().zip(&natural) {
            assert!(w >= n, "no column may shrink below its natural width");
        }
    }
}

#[test]
fn test_wider_columns_get_more_room() {
    let data = table(&["A", "BBBBBBBBBB"], &[&["1", "2"]]);
    let plan = compute_column_widths(&data, 100);
    let widths = plan.widths();
    assert!(widths[1] > widths[0]);
    // 1 + 86*1/11 = 8, 10 + 86*10/11 = 88
    assert_eq!(widths, vec![8, 88]);
}

#[test]
fn test_cells_wider_than_headers() {
    let data = table(&["ID"], &[&["a_long_identifier"]]);
    let plan = compute_column_widths(&data, 0);
    assert_eq!(plan.get("ID"), Some(17));
}

#[test]
fn test_unknown_column_has_no_width() {
    let data = table(&["JOBID"], &[&["1"]]);
    let plan = compute_column_widths(&data, 80);
    assert_eq!(plan.get("NAME"), None);
    assert_eq!(plan.len(), 1);
}
