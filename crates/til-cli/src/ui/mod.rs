//! TUI rendering — orchestrates all panes.

pub mod category_filter;
pub mod fact_form;
pub mod facts_list;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use til_core::category::Category;

use crate::app::{App, Focus};

/// Terminal colour for a category tag.
pub fn category_color(category: Category) -> Color {
  let (r, g, b) = category.rgb();
  Color::Rgb(r, g, b)
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let left = Span::styled(
    " Today I Learned",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    if app.show_form { "[n] Close " } else { "[n] Share a fact " },
    Style::default().fg(Color::Yellow),
  );

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let area = if app.show_form {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(fact_form::HEIGHT), Constraint::Min(0)])
      .split(area);
    fact_form::draw(f, rows[0], app);
    rows[1]
  } else {
    area
  };

  // Sidebar wide enough for the longest category name.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(18), Constraint::Min(0)])
    .split(area);

  category_filter::draw(f, cols[0], app);
  facts_list::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match app.focus {
    Focus::Categories => ("FILTER", "↑↓/jk move  Enter select  Tab facts  n share  q quit"),
    Focus::Facts => (
      "FACTS",
      "↑↓/jk move  1 👍  2 🤯  3 ⛔  r reload  Tab categories  q quit",
    ),
    Focus::Form => ("SHARE", "Tab next field  ←→ category  Enter post  Esc close"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
