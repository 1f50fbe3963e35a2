//! Plain-text rendering of a table view.

use datatable_lib::filter::FilterOption;
use datatable_lib::{Alignment, ColumnWidth, Density, PageInfo, TableView, ViewState};

/// Renders the headers, the current page and the page footer.
pub fn render_view<R>(view: &TableView<'_, R>) -> String {
    let titles: Vec<String> = view.headers.iter().map(|h| h.title()).collect();
    let cells = view.cells();

    let widths: Vec<usize> = view
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| match header.width {
            ColumnWidth::Fixed(width) => usize::from(width),
            ColumnWidth::Auto | ColumnWidth::Flex(_) => cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(titles[i].chars().count()))
                .max()
                .unwrap_or(0),
        })
        .collect();

    let separator = match view.density {
        Density::Compact => " ",
        Density::Standard | Density::Comfortable => "  ",
    };

    let mut lines = Vec::new();
    lines.push(render_line(
        titles.iter().map(String::as_str),
        &widths,
        view.headers.iter().map(|h| h.align),
        separator,
    ));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(separator),
    );

    match view.state {
        ViewState::Loading => lines.push("Loading...".to_string()),
        ViewState::Empty(empty) => {
            let indent = " ".repeat(usize::from(empty.padding));
            lines.push(String::new());
            lines.push(format!("{}{}", indent, empty.message));
            lines.push(String::new());
        }
        ViewState::Rows => {
            for (i, row) in cells.iter().enumerate() {
                if i > 0 && view.density == Density::Comfortable {
                    lines.push(String::new());
                }
                lines.push(render_line(
                    row.iter().map(String::as_str),
                    &widths,
                    view.headers.iter().map(|h| h.align),
                    separator,
                ));
            }
        }
    }

    lines.push(render_footer(&view.page));
    lines.join("\n")
}

/// `< Page 2 of 3 (25 rows) >`, arrows shown only when enabled.
pub fn render_footer(page: &PageInfo) -> String {
    format!(
        "{} Page {} of {} ({} rows) {}",
        if page.can_prev { "<" } else { " " },
        page.page,
        page.total_pages,
        page.total_count,
        if page.can_next { ">" } else { " " },
    )
}

/// One option per line, `value` followed by the label when they differ.
pub fn render_options(options: &[&FilterOption]) -> String {
    if options.is_empty() {
        return "(no options)".to_string();
    }
    options
        .iter()
        .map(|o| {
            if o.label == o.value {
                format!("  {}", o.value)
            } else {
                format!("  {} ({})", o.value, o.label)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    aligns: impl Iterator<Item = Alignment>,
    separator: &str,
) -> String {
    cells
        .zip(widths)
        .zip(aligns)
        .map(|((cell, width), align)| pad(cell, *width, align))
        .collect::<Vec<_>>()
        .join(separator)
        .trim_end()
        .to_string()
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    let len = text.chars().count();
    if len > width {
        if width == 0 {
            return String::new();
        }
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        return cut;
    }
    let gap = width - len;
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(gap)),
        Alignment::Right => format!("{}{}", " ".repeat(gap), text),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}
