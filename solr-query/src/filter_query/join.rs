use super::{Composite, FilterQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinOperator {
    And,
    Or,
}

impl JoinOperator {
    /// The token placed between two joined clauses.
    pub const fn as_str(self) -> &'static str {
        match self {
            JoinOperator::And => " AND ",
            JoinOperator::Or => " OR ",
        }
    }
}

impl FilterQuery {
    pub fn and(clauses: impl IntoIterator<Item = FilterQuery>) -> FilterQuery {
        join(JoinOperator::And, clauses)
    }

    pub fn or(clauses: impl IntoIterator<Item = FilterQuery>) -> FilterQuery {
        join(JoinOperator::Or, clauses)
    }
}

/// Joins `clauses` with ` AND `. See [`or`] for the collapsing rules.
pub fn and(clauses: impl IntoIterator<Item = FilterQuery>) -> FilterQuery {
    FilterQuery::and(clauses)
}

/// Joins `clauses` with ` OR `.
///
/// No clauses give [`FilterQuery::Empty`] and a single clause is returned as is.
/// Otherwise the join is parenthesized when more than one of its clauses is
/// not empty.
pub fn or(clauses: impl IntoIterator<Item = FilterQuery>) -> FilterQuery {
    FilterQuery::or(clauses)
}

fn join(operator: JoinOperator, clauses: impl IntoIterator<Item = FilterQuery>) -> FilterQuery {
    let mut clauses: Vec<FilterQuery> = clauses.into_iter().collect();

    if clauses.len() <= 1 {
        return clauses.pop().unwrap_or_default();
    }

    let non_empty = clauses.iter().filter(|c| !c.is_empty()).count();

    FilterQuery::Composite(Composite {
        operator,
        clauses,
        parenthesize: non_empty > 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(field: &str) -> FilterQuery {
        FilterQuery::field(field).is_true()
    }

    #[test]
    fn joining_nothing_is_empty() {
        assert_eq!(and(Vec::<FilterQuery>::new()), FilterQuery::Empty);
        assert_eq!(or(std::iter::empty::<FilterQuery>()), FilterQuery::Empty);
    }

    #[test]
    fn joining_one_clause_returns_it() {
        assert_eq!(and([leaf("a")]), leaf("a"));

        let inner = or([leaf("a"), leaf("b")]);
        assert_eq!(and([inner.clone()]), inner);
    }

    #[test]
    fn parenthesize_counts_non_empty_clauses() {
        let FilterQuery::Composite(two) = and([leaf("a"), leaf("b")]) else {
            panic!("expected a composite");
        };
        assert!(two.is_parenthesized());
        assert_eq!(two.operator(), JoinOperator::And);

        let FilterQuery::Composite(one) = or([leaf("a"), FilterQuery::empty()]) else {
            panic!("expected a composite");
        };
        assert!(!one.is_parenthesized());
        assert_eq!(one.clauses().len(), 2);
    }

    #[test]
    fn clause_order_is_preserved() {
        let fq = or([leaf("c"), leaf("a"), leaf("b")]);
        assert_eq!(fq.build(), "c:true OR a:true OR b:true");
    }

    #[test]
    fn nested_multi_clause_joins_are_parenthesized() {
        let fq = and([or([leaf("a"), leaf("b")]), leaf("c")]);
        assert_eq!(fq.build(), "(a:true OR b:true) AND c:true");
    }
}
