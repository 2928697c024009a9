// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::Failure;

/// A table of string cells whose first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from rows, the first one being the header.
    ///
    /// # Errors
    ///
    /// Fails if there is no header or a row has another width.
    pub fn new<R, S>(rows: R) -> Result<Self, Failure>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect::<Vec<String>>());
        let header = rows
            .next()
            .ok_or_else(|| Failure::InvalidTable("missing header row".to_string()))?;
        let rows: Vec<Vec<String>> = rows.collect();
        if let Some(bad) = rows.iter().find(|r| r.len() != header.len()) {
            return Err(Failure::InvalidTable(format!(
                "row {bad:?} has {} cells, header has {}",
                bad.len(),
                header.len()
            )));
        }
        Ok(Self { header, rows })
    }

    /// A one-column table.
    ///
    /// # Errors
    ///
    /// Never fails for a single column; kept fallible like [`Self::new`].
    pub fn single_column<S: Into<String>>(
        header: &str,
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self, Failure> {
        let rows = std::iter::once(vec![header.to_string()])
            .chain(values.into_iter().map(|v| vec![v.into()]));
        Self::new(rows)
    }

    /// Header cells.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, without the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Fails unless every `required` column is present and every column is
    /// either required or `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidTable`] naming the offending columns.
    pub fn verify_columns(&self, required: &[&str], allowed: &[&str]) -> Result<(), Failure> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|c| !self.header.iter().any(|h| h == c))
            .collect();
        if !missing.is_empty() {
            return Err(Failure::InvalidTable(format!(
                "missing columns: {}",
                missing.join(", ")
            )));
        }

        let unexpected: Vec<&str> = self
            .header
            .iter()
            .map(String::as_str)
            .filter(|h| !required.contains(h) && !allowed.contains(h))
            .collect();
        if !unexpected.is_empty() {
            return Err(Failure::InvalidTable(format!(
                "unexpected columns: {}",
                unexpected.join(", ")
            )));
        }
        Ok(())
    }

    /// Fails unless the table has `count` columns.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidTable`].
    pub fn verify_column_count(&self, count: usize) -> Result<(), Failure> {
        if self.header.len() == count {
            Ok(())
        } else {
            Err(Failure::InvalidTable(format!(
                "expected {count} columns, found {}",
                self.header.len()
            )))
        }
    }

    /// Each data row keyed by column name.
    #[must_use]
    pub fn column_hash(&self) -> Vec<HashMap<&str, &str>> {
        self.rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }

    /// All values of a column.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidTable`] if there is no such column.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, Failure> {
        let index = self
            .header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Failure::InvalidTable(format!("missing column: {name}")))?;
        Ok(self.rows.iter().map(|r| r[index].as_str()).collect())
    }
}

/// Parses the `| a | b |` form, one row per line.
///
/// Blank lines are skipped; cells are trimmed.
impl FromStr for Table {
    type Err = Failure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|line| {
                let inner = line
                    .strip_prefix('|')
                    .and_then(|l| l.strip_suffix('|'))
                    .ok_or_else(|| Failure::InvalidTable(format!("not a table row: {line}")))?;
                Ok(inner.split('|').map(|c| c.trim().to_string()).collect())
            })
            .collect::<Result<Vec<Vec<String>>, Failure>>()?;
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipe_tables() {
        let table: Table = "
            | user  | path    |
            | alice | /folder |
            | brian | /file   |
        "
        .parse()
        .unwrap();
        assert_eq!(table.header(), ["user", "path"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.column("path").unwrap(), vec!["/folder", "/file"]);
        let hash = table.column_hash();
        assert_eq!(hash[1]["user"], "brian");
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!("| a | b |\n| 1 |".parse::<Table>().is_err());
        assert!("a | b".parse::<Table>().is_err());
        assert!("".parse::<Table>().is_err());
    }

    #[test]
    fn verifies_columns() {
        let table = Table::new([["user", "path"], ["alice", "/"]]).unwrap();
        assert!(table.verify_columns(&["user", "path"], &[]).is_ok());
        assert!(table.verify_columns(&["user"], &["path"]).is_ok());
        assert!(table.verify_columns(&["user"], &[]).is_err());
        assert!(table.verify_columns(&["user", "path", "etag"], &[]).is_err());
        assert!(table.verify_column_count(2).is_ok());
        assert!(table.verify_column_count(1).is_err());
    }

    #[test]
    fn single_column_tables() {
        let table = Table::single_column("propertyName", ["d:getetag"]).unwrap();
        assert_eq!(table.column("propertyName").unwrap(), vec!["d:getetag"]);
        assert!(table.column("other").is_err());
    }
}
