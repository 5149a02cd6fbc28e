//! Tabular rendering for directory listings
//!
//! Produces a box-drawn table with an `(index)` column, quoting string
//! cells and centring them the way a JavaScript console table does.

/// Render rows of string cells under the given headers
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut columns: Vec<Vec<String>> = Vec::with_capacity(headers.len() + 1);

    let mut index_column = vec!["(index)".to_string()];
    index_column.extend((0..rows.len()).map(|i| i.to_string()));
    columns.push(index_column);

    for (col, header) in headers.iter().enumerate() {
        let mut column = vec![header.to_string()];
        column.extend(rows.iter().map(|row| {
            row.get(col)
                .map(|cell| format!("'{}'", cell))
                .unwrap_or_default()
        }));
        columns.push(column);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|column| column.iter().map(|c| c.chars().count()).max().unwrap_or(0) + 2)
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border('┌', '┬', '┐', &widths));
    lines.push(row_line(&columns, 0, &widths));
    lines.push(border('├', '┼', '┤', &widths));
    for r in 1..=rows.len() {
        lines.push(row_line(&columns, r, &widths));
    }
    lines.push(border('└', '┴', '┘', &widths));
    lines.join("\n")
}

fn border(left: char, mid: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    format!("{}{}{}", left, segments.join(&mid.to_string()), right)
}

fn row_line(columns: &[Vec<String>], row: usize, widths: &[usize]) -> String {
    let cells: Vec<String> = columns
        .iter()
        .zip(widths)
        .map(|(column, width)| center(&column[row], *width))
        .collect();
    format!("│{}│", cells.join("│"))
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let padding = width.saturating_sub(len);
    let left = padding / 2;
    let right = padding - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
