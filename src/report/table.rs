//! Box-drawn panels and tables with optional ANSI styling
//!
//! Widths are measured in `char`s before styling is applied, so escape
//! codes never affect alignment.

use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

/// Border color shared by panels and tables (grey50)
pub(crate) fn border_style() -> Style {
    Style::new().truecolor(128, 128, 128)
}

/// A run of text with a single style
#[derive(Debug, Clone)]
pub(crate) struct Span {
    text: String,
    style: Option<Style>,
}

impl Span {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub(crate) fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// A single line of spans
#[derive(Debug, Clone, Default)]
pub(crate) struct Line(Vec<Span>);

impl Line {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self(vec![Span::plain(text)])
    }

    pub(crate) fn styled(text: impl Into<String>, style: Style) -> Self {
        Self(vec![Span::styled(text, style)])
    }

    pub(crate) fn push(mut self, span: Span) -> Self {
        self.0.push(span);
        self
    }

    pub(crate) fn width(&self) -> usize {
        self.0.iter().map(Span::width).sum()
    }

    fn is_empty(&self) -> bool {
        self.width() == 0
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Self(vec![span])
    }
}

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
}

/// Writes styled text, dropping styles when color is off
pub(crate) struct Painter<'w, W: Write> {
    out: &'w mut W,
    color: bool,
}

impl<'w, W: Write> Painter<'w, W> {
    pub(crate) fn new(out: &'w mut W, color: bool) -> Self {
        Self { out, color }
    }

    pub(crate) fn span(&mut self, span: &Span) -> io::Result<()> {
        match span.style {
            Some(style) if self.color => write!(self.out, "{}", span.text.style(style)),
            _ => write!(self.out, "{}", span.text),
        }
    }

    pub(crate) fn text(&mut self, text: &str, style: Style) -> io::Result<()> {
        self.span(&Span::styled(text, style))
    }

    pub(crate) fn line(&mut self, line: &Line) -> io::Result<()> {
        for span in &line.0 {
            self.span(span)?;
        }
        Ok(())
    }

    pub(crate) fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn pad(&mut self, n: usize) -> io::Result<()> {
        write!(self.out, "{:n$}", "")
    }

    fn aligned(&mut self, line: &Line, width: usize, align: Align) -> io::Result<()> {
        let slack = width.saturating_sub(line.width());
        let (left, right) = match align {
            Align::Left => (0, slack),
            Align::Center => (slack / 2, slack - slack / 2),
        };
        self.pad(left)?;
        self.line(line)?;
        self.pad(right)
    }

    /// A horizontal rule with a centered title
    pub(crate) fn rule(&mut self, title: &Line, width: usize) -> io::Result<()> {
        let inner = title.width() + 2;
        let side = width.saturating_sub(inner);
        let left = side / 2;
        self.text(&"─".repeat(left), border_style())?;
        write!(self.out, " ")?;
        self.line(title)?;
        write!(self.out, " ")?;
        self.text(&"─".repeat(side - left), border_style())?;
        self.newline()
    }

    /// A rounded box around `lines`, with an optional title in the top border
    pub(crate) fn panel(&mut self, title: Option<&Line>, lines: &[Line]) -> io::Result<()> {
        let content = lines.iter().map(Line::width).max().unwrap_or(0);
        let title_width = title.map_or(0, |t| t.width() + 4);
        let inner = content.max(title_width) + 2;

        self.text("╭", border_style())?;
        match title {
            Some(title) => {
                let used = title.width() + 2;
                let left = (inner - used) / 2;
                self.text(&"─".repeat(left), border_style())?;
                write!(self.out, " ")?;
                self.line(title)?;
                write!(self.out, " ")?;
                self.text(&"─".repeat(inner - used - left), border_style())?;
            }
            None => self.text(&"─".repeat(inner), border_style())?,
        }
        self.text("╮", border_style())?;
        self.newline()?;

        for line in lines {
            self.text("│", border_style())?;
            write!(self.out, " ")?;
            self.aligned(line, inner - 2, Align::Left)?;
            write!(self.out, " ")?;
            self.text("│", border_style())?;
            self.newline()?;
        }

        self.text("╰", border_style())?;
        self.text(&"─".repeat(inner), border_style())?;
        self.text("╯", border_style())?;
        self.newline()
    }
}

/// Two-column key/value listing used inside panels
#[derive(Debug, Default)]
pub(crate) struct KeyValues {
    entries: Vec<(Line, Line)>,
}

impl KeyValues {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, key: impl Into<Line>, value: impl Into<Line>) {
        self.entries.push((key.into(), value.into()));
    }

    /// An empty row separating groups
    pub(crate) fn gap(&mut self) {
        self.entries.push((Line::new(), Line::new()));
    }

    /// Lay out as lines with the keys padded to a common width
    pub(crate) fn lines(self) -> Vec<Line> {
        let key_width = self.entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
        self.entries
            .into_iter()
            .map(|(key, value)| {
                if key.is_empty() && value.is_empty() {
                    return Line::new();
                }
                let pad = key_width - key.width() + 2;
                let mut line = key;
                line.0.push(Span::plain(" ".repeat(pad)));
                line.0.extend(value.0);
                line
            })
            .collect()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::plain(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::plain(text)
    }
}

/// Separator drawn between table rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Separator {
    Single,
    Double,
}

#[derive(Debug)]
enum TableRow {
    Cells(Vec<Line>),
    Separator(Separator),
}

/// A bordered table with a header row
#[derive(Debug)]
pub(crate) struct Table {
    headers: Vec<(String, Align)>,
    header_style: Style,
    rows: Vec<TableRow>,
}

impl Table {
    pub(crate) fn new(headers: &[(&str, Align)], header_style: Style) -> Self {
        Self {
            headers: headers
                .iter()
                .map(|(h, align)| (h.to_string(), *align))
                .collect(),
            header_style,
            rows: Vec::new(),
        }
    }

    pub(crate) fn add_row(&mut self, cells: Vec<Line>) {
        self.rows.push(TableRow::Cells(cells));
    }

    pub(crate) fn add_separator(&mut self, separator: Separator) {
        self.rows.push(TableRow::Separator(separator));
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|(h, _)| h.chars().count())
            .collect();
        for row in &self.rows {
            if let TableRow::Cells(cells) = row {
                for (width, cell) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(cell.width());
                }
            }
        }
        widths
    }

    /// Total rendered width including borders
    pub(crate) fn width(&self) -> usize {
        let widths = self.column_widths();
        widths.iter().map(|w| w + 3).sum::<usize>() + 1
    }

    pub(crate) fn render<W: Write>(&self, painter: &mut Painter<'_, W>) -> io::Result<()> {
        let widths = self.column_widths();

        border(painter, &widths, ("╭", "─", "┬", "╮"))?;
        let header: Vec<Line> = self
            .headers
            .iter()
            .map(|(h, _)| Line::styled(h.clone(), self.header_style))
            .collect();
        self.cells(painter, &widths, &header)?;
        border(painter, &widths, ("├", "─", "┼", "┤"))?;

        for row in &self.rows {
            match row {
                TableRow::Cells(cells) => self.cells(painter, &widths, cells)?,
                TableRow::Separator(Separator::Single) => {
                    border(painter, &widths, ("├", "─", "┼", "┤"))?
                }
                TableRow::Separator(Separator::Double) => {
                    border(painter, &widths, ("╞", "═", "╪", "╡"))?
                }
            }
        }

        border(painter, &widths, ("╰", "─", "┴", "╯"))
    }

    fn cells<W: Write>(
        &self,
        painter: &mut Painter<'_, W>,
        widths: &[usize],
        cells: &[Line],
    ) -> io::Result<()> {
        let empty = Line::new();
        painter.text("│", border_style())?;
        for (i, (width, (_, align))) in widths.iter().zip(&self.headers).enumerate() {
            let cell = cells.get(i).unwrap_or(&empty);
            painter.pad(1)?;
            painter.aligned(cell, *width, *align)?;
            painter.pad(1)?;
            painter.text("│", border_style())?;
        }
        painter.newline()
    }
}

fn border<W: Write>(
    painter: &mut Painter<'_, W>,
    widths: &[usize],
    (left, fill, join, right): (&str, &str, &str, &str),
) -> io::Result<()> {
    let segments: Vec<String> = widths.iter().map(|w| fill.repeat(w + 2)).collect();
    painter.text(&format!("{}{}{}", left, segments.join(join), right), border_style())?;
    painter.newline()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Painter<'_, Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        let mut painter = Painter::new(&mut out, false);
        f(&mut painter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_panel_lines_have_equal_width() {
        let text = render(|p| {
            p.panel(
                Some(&Line::plain("TITLE")),
                &[Line::plain("short"), Line::plain("a longer line")],
            )
        });
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(text.lines().next().unwrap().contains(" TITLE "));
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new(&[("A", Align::Center), ("Name", Align::Left)], Style::new());
        table.add_row(vec![Line::plain("1"), Line::plain("Cube")]);
        table.add_separator(Separator::Double);
        table.add_row(vec![Line::plain("22"), Line::plain("Sphere")]);
        let width = table.width();
        let text = render(|p| table.render(p));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert_eq!(lines[1], "│ A  │ Name   │");
        assert_eq!(lines[3], "│ 1  │ Cube   │");
        assert!(lines[4].starts_with('╞'));
    }

    #[test]
    fn test_key_values_alignment() {
        let mut kv = KeyValues::new();
        kv.add("Printer", "X1C");
        kv.gap();
        kv.add("Z", "1");
        let lines = kv.lines();
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.0.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(text, ["Printer  X1C", "", "Z        1"]);
    }

    #[test]
    fn test_color_only_when_enabled() {
        let span = Span::styled("x", Style::new().bold());
        let mut plain = Vec::new();
        Painter::new(&mut plain, false).span(&span).unwrap();
        assert_eq!(plain, b"x");

        let mut colored = Vec::new();
        Painter::new(&mut colored, true).span(&span).unwrap();
        assert!(String::from_utf8(colored).unwrap().contains("\u{1b}["));
    }
}
