//! Named productions and their registry

use super::rule::GrammarRule;
use crate::config::compile_time::syntax::MAX_PRODUCTIONS;
use crate::syntax::error::GrammarError;
use std::collections::HashMap;

/// Handle to a registered production
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    name: String,
    index: usize,
}

impl Production {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration index; earlier productions win ties at the top level
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductionDef {
    pub name: String,
    pub rule: GrammarRule,
    pub index: usize,
}

impl ProductionDef {
    /// Whether the production's element takes the repetitions of its root
    /// repeat directly instead of holding a wrapper
    pub fn absorbs_repeat(&self) -> bool {
        matches!(&self.rule, GrammarRule::Repeat { name: None, rule } if !matches!(rule.as_ref(), GrammarRule::Call(_)))
    }

    pub fn handle(&self) -> Production {
        Production {
            name: self.name.clone(),
            index: self.index,
        }
    }
}

/// Productions in declaration order, addressable by name
#[derive(Debug, Clone, Default)]
pub struct ProductionRegistry {
    defs: Vec<ProductionDef>,
    by_name: HashMap<String, usize>,
}

impl ProductionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        rule: GrammarRule,
    ) -> Result<Production, GrammarError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(GrammarError::DuplicateProduction { name });
        }
        if self.defs.len() >= MAX_PRODUCTIONS {
            return Err(GrammarError::TooManyProductions {
                count: self.defs.len() + 1,
                max: MAX_PRODUCTIONS,
            });
        }
        check_repeat_names(&name, &rule)?;

        let index = self.defs.len();
        self.by_name.insert(name.clone(), index);
        self.defs.push(ProductionDef { name, rule, index });
        Ok(self.defs[index].handle())
    }

    pub fn get(&self, name: &str) -> Option<&ProductionDef> {
        self.by_name.get(name).map(|&index| &self.defs[index])
    }

    pub fn by_index(&self, index: usize) -> Option<&ProductionDef> {
        self.defs.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductionDef> {
        self.defs.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(|def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// A repeat needs a wrapper name unless it is the production's own rule
fn check_repeat_names(production: &str, root: &GrammarRule) -> Result<(), GrammarError> {
    let mut pending: Vec<&GrammarRule> = root.children().iter().collect();
    if !matches!(root, GrammarRule::Repeat { .. }) {
        pending = vec![root];
    }
    while let Some(rule) = pending.pop() {
        if matches!(rule, GrammarRule::Repeat { .. }) && rule.repeat_label().is_none() {
            return Err(GrammarError::UnnamedRepeat {
                production: production.to_string(),
            });
        }
        pending.extend(rule.children());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_declaration_order_and_lookup() {
        let mut registry = ProductionRegistry::new();
        let a = registry.register("a", GrammarRule::terminal("a")).unwrap();
        let b = registry.register("b", GrammarRule::call("a")).unwrap();

        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(registry.get("b").map(|def| def.index), Some(1));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = ProductionRegistry::new();
        registry.register("a", GrammarRule::terminal("a")).unwrap();
        assert_matches!(
            registry.register("a", GrammarRule::terminal("b")),
            Err(GrammarError::DuplicateProduction { name }) if name == "a"
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_repeat_naming_rules() {
        let mut registry = ProductionRegistry::new();

        let words = registry
            .register("words", GrammarRule::repeat(GrammarRule::terminal("w")))
            .unwrap();
        assert!(registry.by_index(words.index()).unwrap().absorbs_repeat());

        let numbers = registry
            .register("numbers", GrammarRule::repeat(GrammarRule::call("number")))
            .unwrap();
        assert!(!registry.by_index(numbers.index()).unwrap().absorbs_repeat());

        assert_matches!(
            registry.register(
                "nested",
                GrammarRule::and(vec![GrammarRule::repeat(GrammarRule::terminal("w"))])
            ),
            Err(GrammarError::UnnamedRepeat { production }) if production == "nested"
        );
        assert_matches!(
            registry.register(
                "deep",
                GrammarRule::repeat(GrammarRule::repeat(GrammarRule::terminal("w")))
            ),
            Err(GrammarError::UnnamedRepeat { .. })
        );
        assert!(registry
            .register(
                "named",
                GrammarRule::and(vec![GrammarRule::repeat_named(GrammarRule::terminal("w"), "ws")])
            )
            .is_ok());
    }
}
