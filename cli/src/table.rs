// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use colored::{Color, Colorize};
use davcheck_core::Namespaces;
use davcheck_webdav::MultiStatusResponse;
use unicode_width::UnicodeWidthStr;

/// One property of one entry, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub href: String,
    pub property: String,
    pub value: String,
    pub status: String,
}

impl PropertyRow {
    /// Flattens a multistatus into rows, naming properties by their bound
    /// prefix where one is known.
    pub fn collect(multistatus: &MultiStatusResponse, namespaces: &Namespaces) -> Vec<Self> {
        let mut rows = Vec::new();
        for item in &multistatus.responses {
            let href = item.href.decoded();
            for propstat in &item.prop_stats {
                for prop in &propstat.props {
                    let property = match prop.namespace.as_deref() {
                        Some(uri) => match namespaces.prefix_of(uri) {
                            Some(prefix) => format!("{prefix}:{}", prop.name),
                            None => format!("{{{uri}}}{}", prop.name),
                        },
                        None => prop.name.clone(),
                    };
                    rows.push(Self {
                        href: href.clone(),
                        property,
                        value: prop.value.trim().to_string(),
                        status: status_code(&propstat.status).to_string(),
                    });
                }
            }
            if item.prop_stats.is_empty()
                && let Some(status) = &item.status
            {
                rows.push(Self {
                    href: href.clone(),
                    property: String::new(),
                    value: String::new(),
                    status: status_code(status).to_string(),
                });
            }
        }
        rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyColumn {
    Href,
    Property,
    Value,
    Status,
}

impl PropertyColumn {
    fn format(self, row: &PropertyRow) -> &str {
        match self {
            Self::Href => &row.href,
            Self::Property => &row.property,
            Self::Value => &row.value,
            Self::Status => &row.status,
        }
    }

    fn color(self, row: &PropertyRow) -> Option<Color> {
        match self {
            Self::Status if row.status.starts_with('2') => Some(Color::Green),
            Self::Status => Some(Color::Red),
            Self::Href => Some(Color::Blue),
            _ => None,
        }
    }
}

pub struct Table<'a> {
    pub columns: Vec<PropertyColumn>,
    pub separator: String,
    pub padding: bool,
    pub data: &'a [PropertyRow],
}

impl<'a> Table<'a> {
    pub fn new(data: &'a [PropertyRow]) -> Self {
        Self {
            columns: vec![
                PropertyColumn::Status,
                PropertyColumn::Href,
                PropertyColumn::Property,
                PropertyColumn::Value,
            ],
            separator: "  ".to_string(),
            padding: true,
            data,
        }
    }

    pub fn write_to(&self, w: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        let widths = self.padding.then(|| self.column_widths());
        for row in self.data {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = col.format(row);
                let last = i == self.columns.len() - 1;
                let cell = match &widths {
                    // last column is left-aligned, no padding needed
                    Some(widths) if !last => {
                        let pad = widths[i].saturating_sub(cell.width());
                        format!("{cell}{}", " ".repeat(pad))
                    }
                    _ => cell.to_string(),
                };
                match col.color(row) {
                    Some(color) => write!(w, "{}", cell.color(color))?,
                    None => write!(w, "{cell}")?,
                }
                if last {
                    writeln!(w)?;
                } else {
                    write!(w, "{}", self.separator)?;
                }
            }
        }
        Ok(())
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                self.data
                    .iter()
                    .map(|row| col.format(row).width())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn status_code(status_line: &str) -> &str {
    status_line.split_whitespace().nth(1).unwrap_or(status_line)
}
