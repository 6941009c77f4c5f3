//! Category sidebar — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};
use til_core::category::CategoryFilter;

use super::category_color;
use crate::app::{App, Focus};

/// Render the "All" entry followed by one coloured entry per category.
pub fn draw<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused = app.focus == Focus::Categories;
  let block = Block::default()
    .title(" Categories ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));

  let items: Vec<ListItem> = CategoryFilter::choices()
    .map(|choice| {
      let bg = choice.category().map_or(Color::Gray, category_color);
      let mut style = Style::default().fg(Color::Black).bg(bg);
      if choice == app.filter {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
      }
      let label = match choice {
        CategoryFilter::All => "All".to_owned(),
        CategoryFilter::Only(c) => c.name().to_uppercase(),
      };
      ListItem::new(Line::from(Span::styled(format!(" {label} "), style)))
    })
    .collect();

  let mut state = ListState::default();
  state.select(focused.then_some(app.category_cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_symbol("> "),
    area,
    &mut state,
  );
}
