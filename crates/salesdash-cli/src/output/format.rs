use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const BAR_GLYPH: char = '█';
const MIN_BAR_WIDTH: usize = 10;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

/// Horizontal bars scaled to the largest value. Non-positive values get no bar.
pub fn render_bar_chart(entries: &[(String, f64)], max_width: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let values = entries
        .iter()
        .map(|(_, value)| format_amount(*value))
        .collect::<Vec<String>>();
    let value_width = values.iter().map(String::len).max().unwrap_or(0);
    let bar_budget = cmp::max(
        max_width.saturating_sub(INDENT + label_width + value_width + 2 * COLUMN_GAP),
        MIN_BAR_WIDTH,
    );
    let peak = entries
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);

    entries
        .iter()
        .zip(values.iter())
        .map(|((label, value), shown)| {
            let length = if peak > 0.0 && *value > 0.0 {
                cmp::max(((value / peak) * bar_budget as f64).round() as usize, 1)
            } else {
                0
            };
            let bar = BAR_GLYPH.to_string().repeat(length);
            format!(
                "{}{label:<label_width$}  {shown:>value_width$}  {bar}",
                " ".repeat(INDENT)
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// `$ 1,234` with thousands separators and no decimals.
pub fn format_currency(value: f64) -> String {
    format!("$ {}", format_amount(value))
}

pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `+12% change vs. PY`, or `n/a` when the change is undefined.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(value) => {
            let rounded = if value.round() == 0.0 { 0.0 } else { value.round() };
            let sign = if rounded > 0.0 { "+" } else { "" };
            format!("{sign}{rounded:.0}% change vs. PY")
        }
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Align, Column, format_amount, format_change, format_currency, key_value_rows,
        render_bar_chart, render_table,
    };

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("Rows invalid:", "0".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:     100");
        assert_eq!(rows[1], "  Rows invalid:  0");
    }

    #[test]
    fn table_aligns_columns_to_widest_cell() {
        let columns = [
            Column {
                name: "City",
                align: Align::Left,
            },
            Column {
                name: "Revenue",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["Yokohama".to_string(), "$ 5".to_string()],
            vec!["Osaka".to_string(), "$ 12,000".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered[0], "  City       Revenue");
        assert_eq!(rendered[1], "  Yokohama       $ 5");
        assert_eq!(rendered[2], "  Osaka     $ 12,000");
    }

    #[test]
    fn currency_groups_thousands_and_rounds() {
        assert_eq!(format_currency(1_234_567.6), "$ 1,234,568");
        assert_eq!(format_currency(999.4), "$ 999");
        assert_eq!(format_amount(-1500.0), "-1,500");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn change_is_signed_or_not_available() {
        assert_eq!(format_change(Some(100.0)), "+100% change vs. PY");
        assert_eq!(format_change(Some(-12.4)), "-12% change vs. PY");
        assert_eq!(format_change(Some(0.2)), "0% change vs. PY");
        assert_eq!(format_change(None), "n/a");
    }

    #[test]
    fn bar_chart_scales_to_the_largest_value() {
        let entries = vec![("01".to_string(), 150.0), ("02".to_string(), 50.0)];
        let rendered = render_bar_chart(&entries, 40);
        assert_eq!(rendered.len(), 2);
        let first = rendered[0].chars().filter(|ch| *ch == '█').count();
        let second = rendered[1].chars().filter(|ch| *ch == '█').count();
        assert!(first > second);
        assert!(second >= 1);
        assert!(rendered[0].starts_with("  01  150"));
    }
}
