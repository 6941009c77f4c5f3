//! Fact list pane — right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use til_core::fact::{Fact, VoteKind};

use super::category_color;
use crate::app::{App, Focus};

/// Render the fact list into `area`.
pub fn draw<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused = app.focus == Focus::Facts;
  let mut block = Block::default()
    .title(format!(" Facts: {} ", app.filter))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));
  if let Some(footer) = footer(app.is_loading, app.facts.len()) {
    block = block.title_bottom(footer);
  }

  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.is_loading {
    f.render_widget(
      Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  if app.facts.is_empty() {
    f.render_widget(
      Paragraph::new("No facts for this category yet. Create the first one!")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let width = usize::from(inner.width.saturating_sub(2)).max(10);
  let items: Vec<ListItem> = app
    .facts
    .iter()
    .map(|fact| fact_item(fact, width, app.updating == Some(fact.id)))
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
      .highlight_symbol("▌"),
    inner,
    &mut state,
  );
}

/// The count line, shown only under a loaded, non-empty list.
fn footer(is_loading: bool, count: usize) -> Option<String> {
  (!is_loading && count > 0)
    .then(|| format!(" There are {count} facts in the database. Add your own! "))
}

fn fact_item(fact: &Fact, width: usize, updating: bool) -> ListItem<'static> {
  let mut lines: Vec<Line> = Vec::new();

  if fact.is_disputed() {
    lines.push(Line::from(Span::styled(
      "[⛔ DISPUTED]",
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
  }
  lines.extend(wrap(&fact.text, width).into_iter().map(Line::from));

  lines.push(Line::from(Span::styled(
    format!("(Source: {})", fact.source),
    Style::default()
      .fg(Color::DarkGray)
      .add_modifier(Modifier::ITALIC),
  )));

  let mut meta = vec![
    Span::styled(
      format!(" {} ", fact.category.name().to_uppercase()),
      Style::default()
        .fg(Color::Black)
        .bg(category_color(fact.category)),
    ),
    Span::raw("  "),
  ];
  for (kind, icon) in VoteKind::ALL.into_iter().zip(["👍", "🤯", "⛔"]) {
    meta.push(Span::raw(format!("{icon} {}  ", fact.votes(kind))));
  }
  if updating {
    meta.push(Span::styled("voting...", Style::default().fg(Color::Yellow)));
  }
  lines.push(Line::from(meta));
  lines.push(Line::from(""));

  ListItem::new(lines)
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();
  for word in text.split_whitespace() {
    let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
    if !current.is_empty() && needed > width {
      lines.push(std::mem::take(&mut current));
    }
    if !current.is_empty() {
      current.push(' ');
    }
    current.push_str(word);
  }
  if !current.is_empty() || lines.is_empty() {
    lines.push(current);
  }
  lines
}
