//! `FactList` — the client's best-effort mirror of the table.
//!
//! The store is authoritative. The mirror is replaced wholesale after a
//! fetch and patched with the row the store returns after each write.

use crate::fact::{Fact, FactId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactList {
  facts: Vec<Fact>,
}

impl FactList {
  pub fn new() -> Self { Self::default() }

  /// Replace the mirror with a freshly fetched list.
  pub fn replace_all(&mut self, facts: Vec<Fact>) { self.facts = facts; }

  /// Put a newly inserted row at the top of the list.
  pub fn prepend(&mut self, fact: Fact) { self.facts.insert(0, fact); }

  /// Swap the entry with `fact.id` for the store's copy, keeping its position.
  /// Returns `false` if no entry has that id.
  pub fn reconcile(&mut self, fact: Fact) -> bool {
    match self.facts.iter_mut().find(|f| f.id == fact.id) {
      Some(slot) => {
        *slot = fact;
        true
      }
      None => false,
    }
  }

  pub fn get(&self, index: usize) -> Option<&Fact> { self.facts.get(index) }

  pub fn find(&self, id: FactId) -> Option<&Fact> {
    self.facts.iter().find(|f| f.id == id)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Fact> { self.facts.iter() }

  pub fn len(&self) -> usize { self.facts.len() }

  pub fn is_empty(&self) -> bool { self.facts.is_empty() }
}

impl<'a> IntoIterator for &'a FactList {
  type IntoIter = std::slice::Iter<'a, Fact>;
  type Item = &'a Fact;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::category::Category;

  fn fact(id: FactId, interesting: u32) -> Fact {
    Fact {
      id,
      text: format!("fact {id}"),
      source: "https://example.com".into(),
      category: Category::Science,
      votes_interesting: interesting,
      votes_mindblowing: 0,
      votes_false: 0,
      created_in: 2024,
    }
  }

  fn ids(list: &FactList) -> Vec<FactId> { list.iter().map(|f| f.id).collect() }

  #[test]
  fn prepend_puts_new_row_first() {
    let mut list = FactList::new();
    list.replace_all(vec![fact(1, 5), fact(2, 3)]);
    list.prepend(fact(9, 0));
    assert_eq!(ids(&list), [9, 1, 2]);
  }

  #[test]
  fn reconcile_replaces_in_place() {
    let mut list = FactList::new();
    list.replace_all(vec![fact(1, 5), fact(2, 3), fact(3, 1)]);

    assert!(list.reconcile(fact(2, 4)));
    assert_eq!(ids(&list), [1, 2, 3]);
    assert_eq!(list.find(2).unwrap().votes_interesting, 4);
  }

  #[test]
  fn reconcile_ignores_unknown_ids() {
    let mut list = FactList::new();
    list.replace_all(vec![fact(1, 5)]);
    assert!(!list.reconcile(fact(7, 1)));
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0), Some(&fact(1, 5)));
  }

  #[test]
  fn replace_all_discards_previous_rows() {
    let mut list = FactList::new();
    list.replace_all(vec![fact(1, 5), fact(2, 3)]);
    list.replace_all(vec![]);
    assert!(list.is_empty());
  }
}
