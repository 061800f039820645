//! Ordering
//!
//! Requested sort items are resolved against the column map. Unknown ids
//! are dropped; if nothing is left the listing's default sort applies. The
//! primary key is always the last term so equal rows keep a stable order
//! across pages.

use crate::columns::{ColumnDescriptor, ColumnMap};
use crate::params::SortItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: &'static ColumnDescriptor,
    pub desc: bool,
}

pub fn order_plan(sorting: &[SortItem], map: &ColumnMap) -> Vec<OrderTerm> {
    let mut terms: Vec<OrderTerm> = Vec::with_capacity(sorting.len() + 1);

    for item in sorting {
        let Some(column) = map.get(&item.id) else {
            tracing::debug!(column = %item.id, "Ignoring sort on unknown column");
            continue;
        };
        // First mention of a column wins
        if terms.iter().any(|t| t.column.id == column.id) {
            continue;
        }
        terms.push(OrderTerm {
            column,
            desc: item.desc,
        });
    }

    if terms.is_empty() {
        let (column, desc) = map.default_sort();
        terms.push(OrderTerm { column, desc });
    }

    let primary_key = map.primary_key();
    if !terms.iter().any(|t| t.column.id == primary_key.id) {
        terms.push(OrderTerm {
            column: primary_key,
            desc: false,
        });
    }

    terms
}
