//! Sample rows for an empty board.

use til_core::{
  category::Category,
  fact::{NewFact, VoteKind},
  store::{FactQuery, FactStore},
};

/// A sample fact together with the votes it should carry.
struct Sample {
  text:     &'static str,
  source:   &'static str,
  category: Category,
  votes:    [u32; 3],
}

const SAMPLES: [Sample; 3] = [
  Sample {
    text:     "React is being developed by Meta (formerly facebook)",
    source:   "https://opensource.fb.com/",
    category: Category::Technology,
    votes:    [24, 9, 4],
  },
  Sample {
    text:     "Millennial dads spend 3 times as much time with their kids than \
               their fathers spent with them. In 1982, 43% of fathers had never \
               changed a diaper. Today, that number is down to 3%",
    source:   "https://www.mother.ly/parenting/millennial-dads-spend-more-time-with-their-kids",
    category: Category::Society,
    votes:    [11, 2, 0],
  },
  Sample {
    text:     "Lisbon is the capital of Portugal",
    source:   "https://en.wikipedia.org/wiki/Lisbon",
    category: Category::Society,
    votes:    [8, 3, 1],
  },
];

/// Insert the sample facts if the table has no rows. Returns how many rows
/// were inserted.
pub async fn seed_if_empty<S: FactStore>(store: &S) -> Result<usize, S::Error> {
  let probe = FactQuery {
    limit: Some(1),
    ..FactQuery::default()
  };
  if !store.list_facts(probe).await?.is_empty() {
    return Ok(0);
  }

  for sample in &SAMPLES {
    let fact = store
      .insert_fact(NewFact {
        text:     sample.text.to_owned(),
        source:   sample.source.to_owned(),
        category: sample.category,
      })
      .await?;
    for (kind, count) in VoteKind::ALL.into_iter().zip(sample.votes) {
      if count > 0 {
        store.update_votes(fact.id, kind, count).await?;
      }
    }
  }

  Ok(SAMPLES.len())
}
