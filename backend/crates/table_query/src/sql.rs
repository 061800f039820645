//! PostgreSQL rendering
//!
//! A [`ListPlan`] produces the two statements a list endpoint runs: a
//! `COUNT(*)` over the filtered set, then the ordered, limited page. Every
//! filter value is a bound parameter; only column-map SQL is spliced in.

use sqlx::{Postgres, QueryBuilder};

use crate::columns::ColumnMap;
use crate::order::{OrderTerm, order_plan};
use crate::pagination::offset;
use crate::params::{ListRequest, PageRequest};
use crate::predicate::{Condition, ExactValue, Match, Predicate, build_predicate, like_pattern};

#[derive(Debug, Clone)]
pub struct ListPlan {
    predicate: Option<Predicate>,
    order: Vec<OrderTerm>,
    page: PageRequest,
}

impl ListPlan {
    pub fn new(request: &ListRequest, map: &ColumnMap) -> Self {
        Self {
            predicate: build_predicate(&request.filters, map),
            order: order_plan(&request.sorting, map),
            page: request.pagination,
        }
    }

    /// Add a condition every row must satisfy regardless of filters.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.predicate = Some(Predicate::and(self.predicate.take(), condition));
        self
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// `SELECT COUNT(*) <from> [WHERE ...]`
    ///
    /// `from` is the `FROM` clause, e.g. `"FROM users"`.
    pub fn count_query(&self, from: &str) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) ");
        qb.push(from);
        self.push_where(&mut qb);
        qb
    }

    /// `<select_from> [WHERE ...] ORDER BY ... LIMIT $n OFFSET $m`
    pub fn page_query(&self, select_from: &str) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(select_from);
        self.push_where(&mut qb);
        push_order_by(&mut qb, &self.order);
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(self.page.limit));
        qb.push(" OFFSET ");
        qb.push_bind(offset(self.page) as i64);
        qb
    }

    fn push_where(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        let Some(predicate) = &self.predicate else {
            return;
        };

        qb.push(" WHERE ");
        for (i, condition) in predicate.conditions().iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            push_condition(qb, condition);
        }
    }
}

fn push_condition(qb: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    let column = condition.column.sql;
    match &condition.matcher {
        Match::Contains(raw) => {
            qb.push(column).push(" ILIKE ").push_bind(like_pattern(raw));
        }
        Match::Is(value) => {
            qb.push(column).push(" = ").push_bind(*value);
        }
        Match::Equals(ExactValue::Text(raw)) => {
            qb.push(column).push(" = ").push_bind(raw.clone());
        }
        Match::Equals(ExactValue::Uuid(id)) => {
            qb.push(column).push(" = ").push_bind(*id);
        }
        Match::Equals(ExactValue::Timestamp(at)) => {
            qb.push(column).push(" = ").push_bind(*at);
        }
        Match::Equals(ExactValue::Unmatchable) => {
            qb.push("FALSE");
        }
    }
}

fn push_order_by(qb: &mut QueryBuilder<'static, Postgres>, terms: &[OrderTerm]) {
    qb.push(" ORDER BY ");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(term.column.sql)
            .push(if term.desc { " DESC" } else { " ASC" });
    }
}
