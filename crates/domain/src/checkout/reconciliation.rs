//! Id-keyed diff between an order's desired items and its stored rows.
//!
//! Rows are matched by id only. A row whose id is in both sets is left
//! as-is even if its name, price or quantity differ from the desired item.

use std::collections::HashSet;

use row_store::OrderItemRow;

/// The writes that bring stored item rows in line with an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemReconciliation {
    /// Desired rows with no stored counterpart, in desired order.
    pub to_insert: Vec<OrderItemRow>,

    /// Ids of stored rows absent from the desired list, in storage order.
    pub to_delete: Vec<String>,

    /// Ids present in both sets.
    pub unchanged: Vec<String>,
}

impl ItemReconciliation {
    /// Computes the diff. Inserts and deletes touch disjoint ids, so they may
    /// be applied in any order.
    pub fn plan(desired: Vec<OrderItemRow>, persisted: &[OrderItemRow]) -> Self {
        let persisted_ids: HashSet<&str> = persisted.iter().map(|row| row.id.as_str()).collect();
        let desired_ids: HashSet<String> = desired.iter().map(|row| row.id.clone()).collect();

        let (unchanged, to_insert): (Vec<_>, Vec<_>) = desired
            .into_iter()
            .partition(|row| persisted_ids.contains(row.id.as_str()));

        let to_delete = persisted
            .iter()
            .filter(|row| !desired_ids.contains(&row.id))
            .map(|row| row.id.clone())
            .collect();

        Self {
            to_insert,
            to_delete,
            unchanged: unchanged.into_iter().map(|row| row.id).collect(),
        }
    }

    /// Returns true if no row needs to be written.
    pub fn is_noop(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}
