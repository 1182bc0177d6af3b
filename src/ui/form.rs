//! Terminal view of a [`RenderedForm`].

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::form::{ColumnCount, Control, GridSpan, RenderedField, RenderedForm};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, FIELD_BORDER, FIELD_TEXT, PLACEHOLDER, REQUIRED_MARK, STATUS_ERROR,
    STATUS_OK,
};

const SINGLE_LINE_HEIGHT: u16 = 3;
const MULTI_LINE_HEIGHT: u16 = 5;

/// Grid of bordered inputs, one per rendered field.
pub struct FormView<'a> {
    form: &'a RenderedForm,
    focused: Option<&'a str>,
    show_validity: bool,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a RenderedForm) -> Self {
        Self {
            form,
            focused: None,
            show_validity: false,
        }
    }

    /// Highlight the field with this name.
    pub fn focused(mut self, name: Option<&'a str>) -> Self {
        self.focused = name;
        self
    }

    /// Color field borders by their validity.
    pub fn show_validity(mut self, show: bool) -> Self {
        self.show_validity = show;
        self
    }

    /// Height needed to draw every row.
    pub fn height(&self) -> u16 {
        layout_rows(self.form)
            .iter()
            .map(|row| row.iter().map(|f| field_height(f)).max().unwrap_or(0))
            .sum()
    }

    fn border_style(&self, field: &RenderedField) -> Style {
        if self.focused == Some(field.name) {
            return Style::default().fg(ACCENT).bg(ACTIVE_HIGHLIGHT);
        }
        if self.show_validity {
            return match field.validity() {
                Ok(()) if !field.value.is_empty() => Style::default().fg(STATUS_OK),
                Ok(()) => Style::default().fg(FIELD_BORDER),
                Err(_) => Style::default().fg(STATUS_ERROR),
            };
        }
        Style::default().fg(FIELD_BORDER)
    }

    fn render_field(&self, field: &RenderedField, area: Rect, buf: &mut Buffer) {
        let title = if field.required {
            let bare = field.label.trim_end_matches(" *");
            Line::from(vec![
                Span::styled(format!(" {} ", bare), Style::default().fg(FIELD_TEXT)),
                Span::styled("* ", Style::default().fg(REQUIRED_MARK)),
            ])
        } else {
            Line::from(Span::styled(
                format!(" {} ", field.label),
                Style::default().fg(FIELD_TEXT),
            ))
        };

        let block = Block::bordered()
            .title(title)
            .border_style(self.border_style(field));

        let body = if field.value.is_empty() {
            Line::from(Span::styled(
                field.placeholder.unwrap_or_default(),
                Style::default()
                    .fg(PLACEHOLDER)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                field.value.as_str(),
                Style::default().fg(FIELD_TEXT),
            ))
        };

        let mut paragraph = Paragraph::new(body).block(block);
        if matches!(field.control, Control::MultiLine) {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        paragraph.render(area, buf);
    }
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.form.columns.get();
        let column_width = area.width / columns;
        let mut y = area.y;

        for row in layout_rows(self.form) {
            let row_height = row.iter().map(|f| field_height(f)).max().unwrap_or(0);
            if y + row_height > area.bottom() {
                break;
            }

            let mut x = area.x;
            for field in row {
                let width = match (field.span, self.form.columns) {
                    (GridSpan::Double, _) | (_, ColumnCount::One) => area.width,
                    (GridSpan::Single, ColumnCount::Two) => column_width,
                };
                let cell = Rect::new(x, y, width, field_height(field));
                self.render_field(field, cell, buf);
                x += width;
            }
            y += row_height;
        }
    }
}

fn field_height(field: &RenderedField) -> u16 {
    match field.control {
        Control::SingleLine { .. } => SINGLE_LINE_HEIGHT,
        Control::MultiLine => MULTI_LINE_HEIGHT,
    }
}

/// Pack fields into grid rows. A wide field always starts its own row.
fn layout_rows(form: &RenderedForm) -> Vec<Vec<&RenderedField>> {
    let per_row = usize::from(form.columns.get());
    let mut rows: Vec<Vec<&RenderedField>> = Vec::new();
    let mut current: Vec<&RenderedField> = Vec::new();

    for field in &form.fields {
        if field.span == GridSpan::Double {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            rows.push(vec![field]);
            continue;
        }
        current.push(field);
        if current.len() == per_row {
            rows.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Plain-text dump of a buffer, one string per row with trailing blanks
/// trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol()))
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Draw `form` into an off-screen buffer of the given width.
pub fn draw_form(form: &RenderedForm, focused: Option<&str>, width: u16) -> Buffer {
    let view = FormView::new(form).focused(focused).show_validity(true);
    let area = Rect::new(0, 0, width, view.height());
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf);
    buf
}
