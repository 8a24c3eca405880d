use super::{LsObject, LsOutput};

/// Column titles, printed before each object's rows when asked for
pub const HEADER: [&str; 4] = ["Hash", "Type", "Size", "Name"];

const COLUMN_GAP: &str = "  ";

enum Line {
    Blank,
    Heading(String),
    Row([String; 4]),
}

/// Whether the previous object was introduced by a `<argument>:` heading
#[derive(Clone, Copy, PartialEq, Eq)]
enum Grouping {
    HeadingPrinted,
    NoHeading,
}

/// Render a listing as an aligned text table.
///
/// With more than one object, directories get an `<argument>:` heading and
///  are separated from whatever precedes them by a blank line. Files are
///  printed without a heading, with a blank line only when they follow a
///  directory. Column widths are shared across the whole output; the name
///  column is never padded.
pub fn render(output: &LsOutput, show_headers: bool) -> String {
    let lines = layout(output, show_headers);
    let widths = column_widths(&lines);

    let mut text = String::new();
    for line in &lines {
        match line {
            Line::Blank => {}
            Line::Heading(heading) => {
                text.push_str(heading);
                text.push(':');
            }
            Line::Row(cells) => {
                for (cell, width) in cells.iter().zip(widths.iter()) {
                    text.push_str(&format!("{:<width$}", cell, width = width));
                    text.push_str(COLUMN_GAP);
                }
                text.push_str(&cells[3]);
            }
        }
        text.push('\n');
    }
    text
}

fn layout(output: &LsOutput, show_headers: bool) -> Vec<Line> {
    let grouped = output.objects.len() > 1;
    let mut lines = Vec::new();
    let mut grouping = Grouping::NoHeading;

    for (i, object) in output.objects.iter().enumerate() {
        if grouped && !object.is_single_entry() {
            if i > 0 {
                lines.push(Line::Blank);
            }
            lines.push(Line::Heading(object.argument.clone()));
            grouping = Grouping::HeadingPrinted;
        } else {
            if grouping == Grouping::HeadingPrinted {
                lines.push(Line::Blank);
            }
            grouping = Grouping::NoHeading;
        }

        if show_headers {
            lines.push(Line::Row(HEADER.map(String::from)));
        }
        lines.extend(rows(object).map(Line::Row));
    }

    lines
}

fn rows(object: &LsObject) -> impl Iterator<Item = [String; 4]> + '_ {
    object.links.iter().map(|link| {
        [
            link.hash.clone(),
            link.data_type.to_string(),
            link.size.to_string(),
            link.name.clone(),
        ]
    })
}

/// Widths of the padded columns (all but the last)
fn column_widths(lines: &[Line]) -> [usize; 3] {
    let mut widths = [0; 3];
    for line in lines {
        if let Line::Row(cells) = line {
            for (width, cell) in widths.iter_mut().zip(cells.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }
    widths
}
