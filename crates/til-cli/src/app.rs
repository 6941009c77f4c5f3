//! Application state machine and event dispatcher.
//!
//! Key handlers only mutate local state and queue at most one [`Action`];
//! the event loop draws a frame (so "Loading..." and the disabled form are
//! visible) and then awaits [`App::run_pending`], which talks to the store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use til_core::{
  category::{Category, CategoryFilter},
  fact::{Fact, FactId, NewFact, VoteKind},
  list::FactList,
  store::{FactQuery, FactStore},
  validate::FactDraft,
};

pub const LOAD_ERROR: &str = "There was an error loading the facts.";

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// The category sidebar.
  Categories,
  /// The fact list.
  Facts,
  /// The share-a-fact form.
  Form,
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
  #[default]
  Text,
  Source,
  Category,
}

impl FormField {
  fn next(self) -> Self {
    match self {
      Self::Text => Self::Source,
      Self::Source => Self::Category,
      Self::Category => Self::Text,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Text => Self::Category,
      Self::Source => Self::Text,
      Self::Category => Self::Source,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
  pub draft:        FactDraft,
  pub field:        FormField,
  /// Inputs are disabled while a submission is in flight.
  pub is_uploading: bool,
}

impl FormState {
  /// Step through "no category" and then each category in display order.
  fn cycle_category(&mut self, forward: bool) {
    let options: Vec<Option<Category>> =
      std::iter::once(None).chain(Category::all().map(Some)).collect();
    let current = options
      .iter()
      .position(|c| *c == self.draft.category)
      .unwrap_or_default();
    let next = if forward {
      (current + 1) % options.len()
    } else {
      (current + options.len() - 1) % options.len()
    };
    self.draft.category = options[next];
  }
}

// ─── Pending work ─────────────────────────────────────────────────────────────

/// A store call queued by a key handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Load,
  Submit(NewFact),
  Vote {
    id:    FactId,
    kind:  VoteKind,
    count: u32,
  },
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Which pane receives keys.
  pub focus: Focus,

  /// Whether the share-a-fact form is open.
  pub show_form: bool,

  /// The category whose facts are listed.
  pub filter: CategoryFilter,

  /// Cursor within [`CategoryFilter::choices`].
  pub category_cursor: usize,

  /// Local mirror of the listed facts.
  pub facts: FactList,

  /// Cursor within `facts`.
  pub list_cursor: usize,

  /// A fetch is in flight.
  pub is_loading: bool,

  /// The fact whose vote is in flight, if any.
  pub updating: Option<FactId>,

  pub form: FormState,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pending: Option<Action>,

  store: S,
}

impl<S: FactStore> App<S> {
  /// Create an [`App`] with an empty list; call [`App::select_filter`] to
  /// queue the first fetch.
  pub fn new(store: S) -> Self {
    Self {
      focus: Focus::Facts,
      show_form: false,
      filter: CategoryFilter::All,
      category_cursor: 0,
      facts: FactList::new(),
      list_cursor: 0,
      is_loading: false,
      updating: None,
      form: FormState::default(),
      status_msg: String::new(),
      pending: None,
      store,
    }
  }

  pub fn has_pending(&self) -> bool { self.pending.is_some() }

  /// The fact under the list cursor, if any.
  pub fn cursor_fact(&self) -> Option<&Fact> { self.facts.get(self.list_cursor) }

  // ── Commands ──────────────────────────────────────────────────────────────

  /// Switch the category filter and queue a fetch for it.
  pub fn select_filter(&mut self, filter: CategoryFilter) {
    self.filter = filter;
    self.is_loading = true;
    self.pending = Some(Action::Load);
  }

  pub fn toggle_form(&mut self) {
    self.show_form = !self.show_form;
    self.focus = if self.show_form { Focus::Form } else { Focus::Facts };
  }

  /// Validate the form and queue the insert. Rejected drafts only produce a
  /// status message.
  pub fn submit(&mut self) {
    if self.form.is_uploading {
      return;
    }
    match self.form.draft.validate() {
      Ok(new_fact) => {
        self.form.is_uploading = true;
        self.pending = Some(Action::Submit(new_fact));
      }
      Err(e) => self.status_msg = format!("Cannot post: {e}"),
    }
  }

  /// Queue a vote on the fact under the cursor. The new count is the
  /// mirrored count plus one; concurrent voters overwrite each other.
  pub fn vote(&mut self, kind: VoteKind) {
    if self.updating.is_some() {
      return;
    }
    let Some(fact) = self.cursor_fact() else {
      return;
    };
    let (id, count) = (fact.id, fact.votes(kind).saturating_add(1));
    self.updating = Some(id);
    self.pending = Some(Action::Vote { id, kind, count });
  }

  // ── Store calls ───────────────────────────────────────────────────────────

  /// Run the queued store call, if any, and fold its result into the mirror.
  pub async fn run_pending(&mut self) {
    let Some(action) = self.pending.take() else {
      return;
    };
    match action {
      Action::Load => self.load_facts().await,
      Action::Submit(new_fact) => self.insert(new_fact).await,
      Action::Vote { id, kind, count } => self.update_votes(id, kind, count).await,
    }
  }

  async fn load_facts(&mut self) {
    self.is_loading = true;
    match self.store.list_facts(FactQuery::for_filter(self.filter)).await {
      Ok(facts) => {
        self.facts.replace_all(facts);
        self.list_cursor = 0;
        self.status_msg.clear();
      }
      Err(e) => {
        tracing::error!(error = %e, filter = %self.filter, "loading facts failed");
        self.status_msg = LOAD_ERROR.to_owned();
      }
    }
    self.is_loading = false;
  }

  async fn insert(&mut self, new_fact: NewFact) {
    match self.store.insert_fact(new_fact).await {
      Ok(fact) => {
        tracing::info!(id = fact.id, "shared fact");
        self.facts.prepend(fact);
        self.list_cursor = 0;
        self.status_msg = "Fact shared.".to_owned();
      }
      Err(e) => {
        tracing::error!(error = %e, "sharing fact failed");
        self.status_msg = format!("Error: {e}");
      }
    }
    self.form.is_uploading = false;
    self.form.draft.clear();
    self.form.field = FormField::Text;
  }

  async fn update_votes(&mut self, id: FactId, kind: VoteKind, count: u32) {
    match self.store.update_votes(id, kind, count).await {
      Ok(Some(fact)) => {
        self.facts.reconcile(fact);
      }
      Ok(None) => self.status_msg = format!("Fact {id} no longer exists."),
      Err(e) => {
        tracing::error!(error = %e, id, "vote failed");
        self.status_msg = format!("Error: {e}");
      }
    }
    self.updating = None;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.focus {
      Focus::Form => {
        self.handle_form_key(key);
        true
      }
      Focus::Categories => self.handle_categories_key(key),
      Focus::Facts => self.handle_facts_key(key),
    }
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Esc {
      self.toggle_form();
      return;
    }
    if self.form.is_uploading {
      return;
    }
    match (self.form.field, key.code) {
      (_, KeyCode::Enter) => self.submit(),
      (_, KeyCode::Tab | KeyCode::Down) => self.form.field = self.form.field.next(),
      (_, KeyCode::BackTab | KeyCode::Up) => self.form.field = self.form.field.prev(),

      (FormField::Category, KeyCode::Right | KeyCode::Char(' ' | 'l')) => {
        self.form.cycle_category(true);
      }
      (FormField::Category, KeyCode::Left | KeyCode::Char('h')) => {
        self.form.cycle_category(false);
      }

      (FormField::Text, KeyCode::Char(c)) => self.form.draft.text.push(c),
      (FormField::Text, KeyCode::Backspace) => {
        self.form.draft.text.pop();
      }
      (FormField::Source, KeyCode::Char(c)) => self.form.draft.source.push(c),
      (FormField::Source, KeyCode::Backspace) => {
        self.form.draft.source.pop();
      }
      _ => {}
    }
  }

  fn handle_categories_key(&mut self, key: KeyEvent) -> bool {
    let choices = CategoryFilter::choices().count();
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('n') => self.toggle_form(),

      KeyCode::Down | KeyCode::Char('j') => {
        if self.category_cursor + 1 < choices {
          self.category_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.category_cursor = self.category_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(filter) = CategoryFilter::choices().nth(self.category_cursor) {
          self.select_filter(filter);
        }
        self.focus = Focus::Facts;
      }
      KeyCode::Tab => self.focus = Focus::Facts,
      _ => {}
    }
    true
  }

  fn handle_facts_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('n') => self.toggle_form(),
      KeyCode::Char('r') => self.select_filter(self.filter),

      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.facts.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Char('1') => self.vote(VoteKind::Interesting),
      KeyCode::Char('2') => self.vote(VoteKind::Mindblowing),
      KeyCode::Char('3') => self.vote(VoteKind::False),

      KeyCode::Left | KeyCode::Char('h') | KeyCode::Tab => {
        self.focus = Focus::Categories;
      }
      _ => {}
    }
    true
  }
}
