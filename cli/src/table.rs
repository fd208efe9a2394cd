// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " ";

pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self { columns, data }
    }

    fn widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths = vec![0; self.columns.len()];
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|a| self.columns.iter().map(|col| col.format(a)).collect())
            .collect();

        let widths = self.widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        for (k, (cells, data)) in rows.into_iter().zip(self.data).enumerate() {
            if k > 0 {
                writeln!(f)?;
            }

            for (i, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
                let width = widths[i];
                let cell = match col.padding_direction() {
                    // Last column does not need padding if it's left-aligned
                    PaddingDirection::Left if i == last => cell.into_owned(),
                    PaddingDirection::Left => format!("{cell:<width$}"),
                    PaddingDirection::Right => format!("{cell:>width$}"),
                };

                match col.get_color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }

                if i < last {
                    write!(f, "{SEPARATOR}")?;
                }
            }
        }
        Ok(())
    }
}

pub trait TableColumn<T> {
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}
