// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-and-comma splitting of uploaded CSV text.
//!
//! This is deliberately naive: rows are split on `\n` and cells on `,`, and
//! every `"` is stripped from a cell. A quoted cell that contains a comma or a
//! newline is NOT kept together; it is split like any other text. HubSpot
//! exports without embedded commas import correctly.

/// Header row plus the non-blank data rows of one upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Split `text` into headers and data rows.
    ///
    /// The first line is always the header row. Data lines that are blank
    /// after trimming are dropped; every other line becomes one row, even if
    /// it has fewer or more cells than there are headers.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.split('\n');
        let headers = lines.next().map(split_cells).unwrap_or_default();
        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(split_cells)
            .collect();
        Self { headers, rows }
    }

    /// Pairs of (header, cell) for one row, aligned by position.
    ///
    /// Headers beyond the end of a short row are paired with an empty cell.
    pub fn cells<'a>(&'a self, row: &'a [String]) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.headers
            .iter()
            .enumerate()
            .map(move |(i, header)| (header.as_str(), row.get(i).map_or("", String::as_str)))
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

fn clean_cell(cell: &str) -> String {
    cell.trim().replace('"', "").trim().to_string()
}
