//! FILENAME: core/table-render/src/html.rs
//! PURPOSE: HTML table sink for the pivot view.
//! CONTEXT: Builds the merged table as an HTML string: header row with
//! the category column(s) and the pivot columns, body rows with a
//! vertically spanned category cell per contiguous run. The whole table
//! is rebuilt on every render; the buffer is swapped in one piece so a
//! failed render never leaves partial content behind.

use std::fmt::Write as _;

use pivot_engine::{Hierarchy, PivotView, SENTINEL};

use crate::format::format_value;
use crate::{RenderError, RenderOptions, TableSink};

/// Header labels for the leading key columns.
const CATEGORY_HEADER: &str = "Category";
const SUBCATEGORY_HEADER: &str = "Subcategory";

/// Table sink rendering into an in-memory HTML string.
#[derive(Debug, Default)]
pub struct HtmlTable {
    buffer: String,
}

impl HtmlTable {
    pub fn new() -> Self {
        HtmlTable::default()
    }

    /// The most recently rendered table markup, empty after `clear`.
    pub fn html(&self) -> &str {
        &self.buffer
    }
}

impl TableSink for HtmlTable {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn render(&mut self, view: &PivotView, options: &RenderOptions) -> Result<(), RenderError> {
        if view.spans.len() != view.matrix.rows.len() {
            return Err(RenderError::SpanMismatch {
                spans: view.spans.len(),
                rows: view.matrix.rows.len(),
            });
        }

        let mut out = String::new();
        out.push_str("<table>\n");
        write_header(&mut out, view);
        write_body(&mut out, view, options);
        out.push_str("</table>\n");

        // Swap, don't append: prior content is fully replaced.
        self.buffer = out;
        Ok(())
    }
}

fn write_header(out: &mut String, view: &PivotView) {
    out.push_str("<thead><tr>");
    let _ = write!(out, "<th class=\"category\">{}</th>", CATEGORY_HEADER);
    if view.hierarchy == Hierarchy::Nested {
        let _ = write!(out, "<th class=\"subcategory\">{}</th>", SUBCATEGORY_HEADER);
    }
    for column in &view.matrix.columns {
        let _ = write!(out, "<th class=\"value\">{}</th>", escape(column));
    }
    out.push_str("</tr></thead>\n");
}

fn write_body(out: &mut String, view: &PivotView, options: &RenderOptions) {
    out.push_str("<tbody>\n");

    for (row, &span) in view.matrix.rows.iter().zip(&view.spans) {
        out.push_str("<tr>");

        // Category cell only on the first row of a run; later rows of
        // the run are covered by its rowspan.
        if span > 0 {
            let _ = write!(
                out,
                "<td class=\"category\" rowspan=\"{}\">{}</td>",
                span,
                escape(row.key.top_level())
            );
        }

        if view.hierarchy == Hierarchy::Nested {
            let _ = write!(
                out,
                "<td class=\"subcategory\">{}</td>",
                escape(row.key.subcategory().unwrap_or(""))
            );
        }

        for (column, cell) in view.matrix.columns.iter().zip(&row.cells) {
            let text = cell
                .as_f64()
                .and_then(|v| format_value(v, &row.format))
                .unwrap_or_else(|| SENTINEL.to_string());
            let class = if options.featured_columns.iter().any(|c| c == column) {
                "value featured"
            } else {
                "value"
            };
            let _ = write!(out, "<td class=\"{}\">{}</td>", class, escape(&text));
        }

        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n");
}

/// Minimal HTML text escaping for cell and header content.
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
