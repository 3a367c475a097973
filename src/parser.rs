use lasso::{Rodeo, Spur};

/// A snapshot of the job queue as reported by the listing command.
///
/// Rows keep the order the scheduler printed them in. Every row has exactly
/// one cell per header; lines that don't match are dropped while parsing.
pub struct Dataset {
    /// Column headers from the first line
    pub headers: Vec<String>,
    /// Data rows (each row is a vector of interned symbols)
    pub rows: Vec<Vec<Spur>>,
    /// String interner for this snapshot's cells
    pub interner: Rodeo,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [Spur],
    interner: &'a Rodeo,
}

impl<'a> Row<'a> {
    /// Look up a cell by its column name.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.cells.get(idx).map(|spur| self.interner.resolve(spur))
    }

    /// Iterate over `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let Row {
            headers,
            cells,
            interner,
        } = *self;
        headers
            .iter()
            .zip(cells.iter())
            .map(move |(h, spur)| (h.as_str(), interner.resolve(spur)))
    }
}

impl Dataset {
    /// An empty snapshot with no headers.
    pub fn empty() -> Self {
        Dataset {
            headers: Vec::new(),
            rows: Vec::new(),
            interner: Rodeo::default(),
        }
    }

    /// Build a dataset from owned cells. Rows whose length differs from the
    /// header count are skipped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut interner = Rodeo::default();
        let rows = rows
            .into_iter()
            .filter(|row| row.len() == headers.len())
            .map(|row| row.iter().map(|cell| interner.get_or_intern(cell)).collect())
            .collect();
        Dataset {
            headers,
            rows,
            interner,
        }
    }

    /// Returns the number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns the number of data rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a Spur symbol to its string value.
    pub fn resolve(&self, spur: &Spur) -> &str {
        self.interner.resolve(spur)
    }

    /// Borrow row `idx`, if present.
    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        self.rows.get(idx).map(|cells| Row {
            headers: &self.headers,
            cells,
            interner: &self.interner,
        })
    }

    /// Iterate over all rows in scheduler order.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            headers: &self.headers,
            cells,
            interner: &self.interner,
        })
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("headers", &self.headers)
            .field("rows_count", &self.rows.len())
            .finish()
    }
}

/// Split a line on runs of whitespace.
fn split_fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse the whitespace-aligned output of `squeue` into a [`Dataset`].
///
/// Expected format:
/// ```text
///              JOBID PARTITION                 NAME     USER    STATE
///             123456       gpu              train_a    alice  RUNNING
///             123457       cpu              prep_b     alice  PENDING
/// ```
///
/// The first non-empty line is the header. Data lines with a different
/// number of fields than the header are dropped. Blank input yields an empty
/// dataset.
pub fn parse_squeue(input: &str) -> Dataset {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(line) => split_fields(line).into_iter().map(str::to_string).collect(),
        None => return Dataset::empty(),
    };

    let mut interner = Rodeo::default();
    let mut rows: Vec<Vec<Spur>> = Vec::new();

    for line in lines {
        let values = split_fields(line);
        if values.len() != headers.len() {
            log::debug!(
                "dropping line with {} fields (expected {}): {:?}",
                values.len(),
                headers.len(),
                line
            );
            continue;
        }
        rows.push(values.iter().map(|v| interner.get_or_intern(v)).collect());
    }

    Dataset {
        headers,
        rows,
        interner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_jobs() {
        let table = parse_squeue("JOBID NAME\n123 job1\n456 job2");

        assert_eq!(table.headers, vec!["JOBID", "NAME"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0).unwrap().get("JOBID"), Some("123"));
        assert_eq!(table.row(0).unwrap().get("NAME"), Some("job1"));
        assert_eq!(table.row(1).unwrap().get("JOBID"), Some("456"));
        assert_eq!(table.row(1).unwrap().get("NAME"), Some("job2"));
    }

    #[test]
    fn test_parse_right_aligned_columns() {
        let input = "             JOBID PARTITION     NAME  STATE
            123456       gpu  train_a RUNNING
            123457       cpu   prep_b PENDING
";
        let table = parse_squeue(input);
        assert_eq!(table.headers, vec!["JOBID", "PARTITION", "NAME", "STATE"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(1).unwrap().get("STATE"), Some("PENDING"));
    }

    #[test]
    fn test_parse_drops_mismatched_lines() {
        let input = "JOBID NAME STATE
1 a RUNNING
2 b
3 c PENDING extra
4 d PENDING";
        let table = parse_squeue(input);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0).unwrap().get("JOBID"), Some("1"));
        assert_eq!(table.row(1).unwrap().get("JOBID"), Some("4"));
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_squeue("JOBID NAME\n");
        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let table = parse_squeue("");
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_parse_whitespace_only() {
        let table = parse_squeue("   \n  \n  ");
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_row_lookup_unknown_column() {
        let table = parse_squeue("JOBID NAME\n1 a");
        assert_eq!(table.row(0).unwrap().get("USER"), None);
        assert!(table.row(1).is_none());
    }

    #[test]
    fn test_row_iter_keeps_column_order() {
        let table = parse_squeue("B A\n2 1");
        let pairs: Vec<(&str, &str)> = table.row(0).unwrap().iter().collect();
        assert_eq!(pairs, vec![("B", "2"), ("A", "1")]);
    }

    #[test]
    fn test_from_rows_skips_ragged() {
        let table = Dataset::from_rows(
            vec!["x".into(), "y".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        );
        assert_eq!(table.row_count(), 1);
    }
}
