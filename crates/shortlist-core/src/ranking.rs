//! The ranking engine: rank allocation and slot-preserving reorders.
//!
//! A lecturer only ever sees part of the store, so a reorder cannot simply
//! renumber `1..=n`. Instead the subset keeps the exact set of rank values
//! ("slots") it already occupies and only permutes which application sits in
//! which slot. Applications outside the subset are never touched, so global
//! uniqueness holds by construction.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{ApplicationId, Rank},
};

/// The rank for a new application given the current maximum, if any.
pub fn next_rank(max: Option<Rank>) -> Rank { max.map_or(1, |m| m + 1) }

/// Compute new ranks for `order`, the desired top-to-bottom order of a
/// subset, given the current rank of every member.
///
/// Returns `(id, new_rank)` pairs in `order` order. The multiset of ranks is
/// identical before and after.
pub fn redistribute(
  order: &[ApplicationId],
  current: &HashMap<ApplicationId, Rank>,
) -> Result<Vec<(ApplicationId, Rank)>> {
  let mut seen = HashSet::with_capacity(order.len());
  let mut slots = Vec::with_capacity(order.len());
  for id in order {
    if !seen.insert(*id) {
      return Err(Error::RepeatedInOrder(*id));
    }
    let rank = current.get(id).ok_or(Error::ApplicationNotFound(*id))?;
    slots.push(*rank);
  }
  slots.sort_unstable();

  Ok(order.iter().copied().zip(slots).collect())
}

/// Direction for a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  /// Towards rank 1.
  Up,
  Down,
}

/// The two-element order that moves `id` one step in `direction` within
/// `ordered` (ids sorted by ascending rank).
///
/// Returns `None` if `id` is absent or already at that end of the list.
pub fn adjacent_swap(
  ordered: &[ApplicationId],
  id: ApplicationId,
  direction: Direction,
) -> Option<[ApplicationId; 2]> {
  let pos = ordered.iter().position(|x| *x == id)?;
  match direction {
    Direction::Up => {
      let above = *ordered.get(pos.checked_sub(1)?)?;
      Some([id, above])
    }
    Direction::Down => {
      let below = *ordered.get(pos + 1)?;
      Some([below, id])
    }
  }
}
