//! Selection ledger types.
//!
//! A selection is a lecturer's mark of interest in an application. It exists
//! or it does not; there is nothing to update in place.

use serde::{Deserialize, Serialize};

use crate::ids::{ApplicationId, LecturerId};

/// Result of [`crate::store::ReviewStore::toggle_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
  pub lecturer_id:    LecturerId,
  pub application_id: ApplicationId,
  /// State after the toggle.
  pub selected:       bool,
}

/// How often an application was selected relative to a scope the caller
/// chose (e.g. the applications currently on screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionLabel {
  NotSelected,
  MostSelected,
  LeastSelected,
  Selected,
}

/// Label every `(id, count)` pair against the others in `scope`.
///
/// Zero counts are `NotSelected`. Among the rest, the maximum count is
/// `MostSelected` and the smallest non-zero count is `LeastSelected`; when
/// both coincide, `MostSelected` wins.
pub fn label_selections(
  scope: &[(ApplicationId, u64)],
) -> Vec<(ApplicationId, SelectionLabel)> {
  let max = scope.iter().map(|(_, c)| *c).max().unwrap_or(0);
  let min_nonzero = scope
    .iter()
    .map(|(_, c)| *c)
    .filter(|c| *c > 0)
    .min()
    .unwrap_or(0);

  scope
    .iter()
    .map(|(id, count)| {
      let label = match *count {
        0 => SelectionLabel::NotSelected,
        c if c == max => SelectionLabel::MostSelected,
        c if c == min_nonzero => SelectionLabel::LeastSelected,
        _ => SelectionLabel::Selected,
      };
      (*id, label)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn labels_against_the_given_scope() {
    let scope = [
      (ApplicationId(1), 0),
      (ApplicationId(2), 3),
      (ApplicationId(3), 1),
      (ApplicationId(4), 2),
      (ApplicationId(5), 3),
    ];
    let labels: Vec<_> =
      label_selections(&scope).into_iter().map(|(_, l)| l).collect();
    assert_eq!(
      labels,
      vec![
        SelectionLabel::NotSelected,
        SelectionLabel::MostSelected,
        SelectionLabel::LeastSelected,
        SelectionLabel::Selected,
        SelectionLabel::MostSelected,
      ]
    );
  }

  #[test]
  fn single_selected_item_is_most_selected() {
    let scope = [(ApplicationId(1), 2), (ApplicationId(2), 0)];
    let labels = label_selections(&scope);
    assert_eq!(labels[0].1, SelectionLabel::MostSelected);
    assert_eq!(labels[1].1, SelectionLabel::NotSelected);
  }

  #[test]
  fn empty_scope() {
    assert!(label_selections(&[]).is_empty());
  }
}
