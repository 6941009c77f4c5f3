//! Submission rules shared by the form and the table endpoint.

use url::Url;

use crate::{
  category::Category,
  error::ValidationError,
  fact::NewFact,
};

/// Maximum fact length, in characters.
pub const MAX_TEXT_LEN: usize = 200;

/// `true` if `s` parses as an absolute URL with an `http` or `https` scheme.
pub fn is_valid_http_url(s: &str) -> bool {
  Url::parse(s).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

fn check(text: &str, source: &str, category: Option<Category>) -> Result<Category, ValidationError> {
  if text.is_empty() {
    return Err(ValidationError::EmptyText);
  }
  let len = text.chars().count();
  if len > MAX_TEXT_LEN {
    return Err(ValidationError::TextTooLong { len });
  }
  // Line breaks and tabs are text; anything else (NUL included) is not.
  if let Some(position) = text
    .chars()
    .position(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
  {
    return Err(ValidationError::ControlCharacter { position });
  }
  if !is_valid_http_url(source) {
    return Err(ValidationError::InvalidSource(source.to_owned()));
  }
  category.ok_or(ValidationError::MissingCategory)
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The share-a-fact form while it is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactDraft {
  pub text:     String,
  pub source:   String,
  pub category: Option<Category>,
}

impl FactDraft {
  /// Characters left before the limit; negative once the text is too long.
  pub fn remaining(&self) -> i64 {
    MAX_TEXT_LEN as i64 - self.text.chars().count() as i64
  }

  /// Check the draft and turn it into an insertable [`NewFact`].
  pub fn validate(&self) -> Result<NewFact, ValidationError> {
    let category = check(&self.text, &self.source, self.category)?;
    Ok(NewFact {
      text: self.text.clone(),
      source: self.source.clone(),
      category,
    })
  }

  pub fn clear(&mut self) { *self = Self::default(); }
}

impl NewFact {
  /// Re-apply the form rules to a row arriving from elsewhere.
  pub fn validate(&self) -> Result<(), ValidationError> {
    check(&self.text, &self.source, Some(self.category)).map(|_| ())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(text: &str, source: &str, category: Option<Category>) -> FactDraft {
    FactDraft {
      text: text.into(),
      source: source.into(),
      category,
    }
  }

  // ── URLs ──────────────────────────────────────────────────────────────────

  #[test]
  fn accepts_http_and_https() {
    assert!(is_valid_http_url("https://opensource.fb.com/"));
    assert!(is_valid_http_url("http://example.com/path?q=1"));
    assert!(is_valid_http_url("HTTPS://EXAMPLE.COM"));
  }

  #[test]
  fn rejects_other_schemes_and_garbage() {
    assert!(!is_valid_http_url("ftp://example.com/file"));
    assert!(!is_valid_http_url("mailto:someone@example.com"));
    assert!(!is_valid_http_url("javascript:alert(1)"));
    assert!(!is_valid_http_url("example.com"));
    assert!(!is_valid_http_url(""));
    assert!(!is_valid_http_url("not a url"));
  }

  // ── Drafts ────────────────────────────────────────────────────────────────

  #[test]
  fn valid_draft_becomes_new_fact() {
    let d = draft(
      "Lisbon is the capital of Portugal",
      "https://en.wikipedia.org/wiki/Lisbon",
      Some(Category::Society),
    );
    let new = d.validate().unwrap();
    assert_eq!(new.text, d.text);
    assert_eq!(new.source, d.source);
    assert_eq!(new.category, Category::Society);
  }

  #[test]
  fn empty_text_rejected() {
    let d = draft("", "https://example.com", Some(Category::News));
    assert_eq!(d.validate(), Err(ValidationError::EmptyText));
  }

  #[test]
  fn text_limit_is_inclusive() {
    let ok = draft(&"a".repeat(200), "https://example.com", Some(Category::News));
    assert!(ok.validate().is_ok());
    assert_eq!(ok.remaining(), 0);

    let long = draft(&"a".repeat(201), "https://example.com", Some(Category::News));
    assert_eq!(long.validate(), Err(ValidationError::TextTooLong { len: 201 }));
    assert_eq!(long.remaining(), -1);
  }

  #[test]
  fn text_length_counts_characters_not_bytes() {
    let d = draft(&"é".repeat(200), "https://example.com", Some(Category::News));
    assert!(d.validate().is_ok());
  }

  #[test]
  fn control_characters_rejected() {
    let nul = draft("\u{0}hidden", "https://example.com", Some(Category::News));
    assert_eq!(nul.validate(), Err(ValidationError::ControlCharacter { position: 0 }));

    let bell = draft("ring\u{7}", "https://example.com", Some(Category::News));
    assert_eq!(bell.validate(), Err(ValidationError::ControlCharacter { position: 4 }));
  }

  #[test]
  fn line_breaks_and_tabs_allowed() {
    let d = draft("first line\nsecond\tcolumn", "https://example.com", Some(Category::News));
    assert!(d.validate().is_ok());
  }

  #[test]
  fn bad_source_rejected() {
    let d = draft("A fact", "ftp://example.com", Some(Category::News));
    assert!(matches!(d.validate(), Err(ValidationError::InvalidSource(_))));
  }

  #[test]
  fn missing_category_rejected() {
    let d = draft("A fact", "https://example.com", None);
    assert_eq!(d.validate(), Err(ValidationError::MissingCategory));
  }

  #[test]
  fn clear_resets_every_field() {
    let mut d = draft("A fact", "https://example.com", Some(Category::Health));
    d.clear();
    assert_eq!(d, FactDraft::default());
    assert_eq!(d.remaining(), 200);
  }

  #[test]
  fn new_fact_validate_uses_the_same_rules() {
    let bad = NewFact {
      text:     String::new(),
      source:   "https://example.com".into(),
      category: Category::Science,
    };
    assert_eq!(bad.validate(), Err(ValidationError::EmptyText));
  }
}
