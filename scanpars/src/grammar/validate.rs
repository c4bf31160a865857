//! Whole-grammar checks run before the first parse
//!
//! Two properties cannot be checked one production at a time: every call
//! must name a registered production, and no repeat may wrap a rule that
//! can succeed without consuming a token (it would never stop). The second
//! needs nullability of calls, computed as a fixpoint over all productions.

use super::production::ProductionRegistry;
use super::rule::GrammarRule;
use crate::syntax::error::GrammarError;
use std::collections::HashSet;

pub fn validate(registry: &ProductionRegistry) -> Result<(), GrammarError> {
    check_calls(registry)?;
    check_repeats(registry)
}

fn check_calls(registry: &ProductionRegistry) -> Result<(), GrammarError> {
    for def in registry.iter() {
        if let Some(missing) = def.rule.calls().into_iter().find(|name| !registry.contains(name)) {
            return Err(GrammarError::UndefinedProduction {
                name: missing.to_string(),
                referenced_by: def.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_repeats(registry: &ProductionRegistry) -> Result<(), GrammarError> {
    let nullable = nullable_productions(registry);
    for def in registry.iter() {
        let mut pending = vec![&def.rule];
        while let Some(rule) = pending.pop() {
            if let GrammarRule::Repeat { rule: inner, .. } = rule {
                if is_nullable(inner, &nullable) {
                    return Err(GrammarError::NullableRepeat {
                        production: def.name.clone(),
                    });
                }
            }
            pending.extend(rule.children().iter());
        }
    }
    Ok(())
}

/// Names of productions that can match without consuming a token
pub fn nullable_productions(registry: &ProductionRegistry) -> HashSet<String> {
    let mut nullable = HashSet::new();
    loop {
        let before = nullable.len();
        for def in registry.iter() {
            if !nullable.contains(&def.name) && is_nullable(&def.rule, &nullable) {
                nullable.insert(def.name.clone());
            }
        }
        if nullable.len() == before {
            return nullable;
        }
    }
}

fn is_nullable(rule: &GrammarRule, nullable: &HashSet<String>) -> bool {
    match rule {
        GrammarRule::Terminal(_) => false,
        GrammarRule::And(rules) => rules.iter().all(|r| is_nullable(r, nullable)),
        GrammarRule::Or(rules) => rules.iter().any(|r| is_nullable(r, nullable)),
        GrammarRule::Not(_) | GrammarRule::Optional(_) | GrammarRule::Repeat { .. } => true,
        GrammarRule::Call(name) => nullable.contains(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn registry(rules: Vec<(&str, GrammarRule)>) -> ProductionRegistry {
        let mut registry = ProductionRegistry::new();
        for (name, rule) in rules {
            registry.register(name, rule).unwrap();
        }
        registry
    }

    #[test]
    fn test_forward_references_are_fine() {
        let grammar = registry(vec![
            ("pair", GrammarRule::and(vec![GrammarRule::call("number"), GrammarRule::call("number")])),
            ("number", GrammarRule::terminal_type("UINT")),
        ]);
        assert_eq!(validate(&grammar), Ok(()));
    }

    #[test]
    fn test_undefined_call() {
        let grammar = registry(vec![("main", GrammarRule::optional(GrammarRule::call("missing")))]);
        assert_matches!(
            validate(&grammar),
            Err(GrammarError::UndefinedProduction { name, referenced_by })
                if name == "missing" && referenced_by == "main"
        );
    }

    #[test]
    fn test_nullable_repeat_through_calls() {
        let grammar = registry(vec![
            ("maybe", GrammarRule::optional(GrammarRule::terminal("x"))),
            ("indirect", GrammarRule::and(vec![GrammarRule::call("maybe")])),
            ("loop", GrammarRule::repeat(GrammarRule::call("indirect"))),
        ]);
        assert_eq!(
            nullable_productions(&grammar),
            ["maybe", "indirect", "loop"].iter().map(|s| s.to_string()).collect()
        );
        assert_matches!(
            validate(&grammar),
            Err(GrammarError::NullableRepeat { production }) if production == "loop"
        );
    }

    #[test]
    fn test_not_inside_repeat_is_nullable() {
        let grammar = registry(vec![(
            "bad",
            GrammarRule::repeat_named(GrammarRule::not(GrammarRule::terminal("x")), "nots"),
        )]);
        assert_matches!(validate(&grammar), Err(GrammarError::NullableRepeat { .. }));
    }
}
