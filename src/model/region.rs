//! Named-table region references.

use crate::error::ExtractError;

/// The rectangular cell range bound to a named table: 1-based row and
/// column bounds, header row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl TableRegion {
    /// Parses an `A1:E10`-style reference pair into row/column bounds.
    pub fn parse(reference: &str) -> Result<Self, ExtractError> {
        let malformed = |detail: &str| ExtractError::MalformedRegion {
            reference: reference.to_string(),
            detail: detail.to_string(),
        };

        let (start, end) = reference
            .split_once(':')
            .ok_or_else(|| malformed("expected a start:end cell pair"))?;
        let (min_col, min_row) =
            parse_cell(start).ok_or_else(|| malformed("unparseable start cell"))?;
        let (max_col, max_row) = parse_cell(end).ok_or_else(|| malformed("unparseable end cell"))?;

        if max_row < min_row || max_col < min_col {
            return Err(malformed("region ends before it starts"));
        }

        Ok(Self {
            min_row,
            max_row,
            min_col,
            max_col,
        })
    }

    /// Row numbers of the data rows: everything below the header row.
    pub fn data_rows(&self) -> impl Iterator<Item = u32> {
        self.min_row + 1..=self.max_row
    }

    /// Column indices across the region, left to right.
    pub fn columns(&self) -> impl Iterator<Item = u32> {
        self.min_col..=self.max_col
    }
}

/// Splits `E10` into a 1-based (column, row) pair.
fn parse_cell(cell: &str) -> Option<(u32, u32)> {
    let cell: String = cell.trim().chars().filter(|c| *c != '$').collect();
    let digits_at = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(digits_at);
    let col = column_index(letters)?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((col, row))
}

/// Converts column letters to a 1-based index (`A` → 1, `AA` → 27).
fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index
            .checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_reference() {
        let region = TableRegion::parse("A1:E10").unwrap();
        assert_eq!(
            region,
            TableRegion {
                min_row: 1,
                max_row: 10,
                min_col: 1,
                max_col: 5,
            }
        );
    }

    #[test]
    fn converts_multi_letter_columns() {
        let region = TableRegion::parse("AA10:AB20").unwrap();
        assert_eq!(region.min_col, 27);
        assert_eq!(region.max_col, 28);
    }

    #[test]
    fn tolerates_absolute_markers_and_lowercase() {
        let region = TableRegion::parse("$a$1:$e$4").unwrap();
        assert_eq!(region.min_col, 1);
        assert_eq!(region.max_col, 5);
        assert_eq!(region.max_row, 4);
    }

    #[test]
    fn rejects_malformed_references() {
        for bad in ["A1", "A1:E", "1:E10", ":E10", "A1:10", "A0:E4", "E10:A1", ""] {
            let err = TableRegion::parse(bad).unwrap_err();
            assert!(
                matches!(err, ExtractError::MalformedRegion { .. }),
                "{bad:?} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn header_only_region_has_no_data_rows() {
        let region = TableRegion::parse("A1:E1").unwrap();
        assert_eq!(region.data_rows().count(), 0);
    }

    #[test]
    fn data_rows_exclude_the_header() {
        let region = TableRegion::parse("B2:F5").unwrap();
        assert_eq!(region.data_rows().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(region.columns().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }
}
