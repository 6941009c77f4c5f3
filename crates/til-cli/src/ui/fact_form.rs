//! Share-a-fact form — shown above the list while open.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use til_core::validate::MAX_TEXT_LEN;

use super::category_color;
use crate::app::{App, FormField};

/// Rows taken by the form, borders included.
pub const HEIGHT: u16 = 5;

pub fn draw<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let form = &app.form;
  let title = if form.is_uploading {
    " Share a fact (posting...) "
  } else {
    " Share a fact "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let label = |field: FormField, name: &'static str| {
    let style = if form.is_uploading {
      Style::default().fg(Color::DarkGray)
    } else if form.field == field {
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("{name:<10}"), style)
  };
  let cursor = |field: FormField| {
    if form.field == field && !form.is_uploading { "_" } else { "" }
  };

  let remaining = form.draft.remaining();
  let counter_style = if remaining < 0 {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  let text_line = Line::from(vec![
    label(FormField::Text, "Fact"),
    Span::raw(format!("{}{}", form.draft.text, cursor(FormField::Text))),
    if form.draft.text.is_empty() {
      Span::styled("Share a fact with the world...", Style::default().fg(Color::DarkGray))
    } else {
      Span::raw("")
    },
    Span::styled(format!("  {remaining}/{MAX_TEXT_LEN}"), counter_style),
  ]);

  let source_line = Line::from(vec![
    label(FormField::Source, "Source"),
    Span::raw(format!("{}{}", form.draft.source, cursor(FormField::Source))),
    if form.draft.source.is_empty() {
      Span::styled("Trustworthy source...", Style::default().fg(Color::DarkGray))
    } else {
      Span::raw("")
    },
  ]);

  let category_span = match form.draft.category {
    Some(c) => Span::styled(
      format!(" {} ", c.name().to_uppercase()),
      Style::default().fg(Color::Black).bg(category_color(c)),
    ),
    None => Span::styled("Choose category:", Style::default().fg(Color::DarkGray)),
  };
  let category_line = Line::from(vec![
    label(FormField::Category, "Category"),
    Span::raw("◀ "),
    category_span,
    Span::raw(" ▶"),
  ]);

  f.render_widget(
    Paragraph::new(vec![text_line, source_line, category_line]).block(block),
    area,
  );
}
