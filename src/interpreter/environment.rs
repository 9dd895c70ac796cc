/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the ESNAMES project.
 *
 * ESNAMES is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::FunctionNode;
use crate::value::Value;

/// A script function paired with the scope it was created in.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub node: Rc<FunctionNode>,
    pub closure: Rc<RefCell<Environment>>,
}

/// One lexical scope: the global scope, a function activation, or the
/// scope a `catch` clause opens for its parameter.
///
/// `this` is stored as an ordinary binding named `"this"`; since `this` is
/// a reserved word no script binding can ever shadow it.
#[derive(Debug)]
pub struct Environment {
    pub values: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,

    /// Code running in this scope is strict mode code.
    pub strict: bool,
}

impl Environment {
    /// A child scope inheriting the parent's strictness.
    pub fn new(parent: Option<Rc<RefCell<Environment>>>) -> Self {
        let strict = parent.as_ref().map_or(false, |p| p.borrow().strict);
        Self {
            values: HashMap::new(),
            parent,
            strict,
        }
    }

    pub fn shared(parent: Option<Rc<RefCell<Environment>>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Self::new(parent)))
    }

    /// Creates or overwrites a binding in this scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Creates a binding holding `undefined` unless one already exists;
    /// `var` hoisting must not reset earlier values.
    pub fn declare(&mut self, name: &str) {
        self.values
            .entry(name.to_string())
            .or_insert(Value::Undefined);
    }

    /// Updates the nearest existing binding. Returns false when no scope
    /// in the chain has one.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }

        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }

        false
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }

        if let Some(parent) = &self.parent {
            return parent.borrow().get(name);
        }

        None
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
            || self.parent.as_ref().map_or(false, |p| p.borrow().has(name))
    }

    /// Defines a binding on the outermost scope, used for sloppy-mode
    /// assignment to undeclared names.
    pub fn define_global(&mut self, name: &str, value: Value) {
        match &self.parent {
            Some(parent) => parent.borrow_mut().define_global(name, value),
            None => self.define(name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_the_chain() {
        let global = Environment::shared(None);
        global.borrow_mut().define("x", Value::Number(1.0));

        let local = Environment::shared(Some(global.clone()));
        assert_eq!(local.borrow().get("x"), Some(Value::Number(1.0)));

        assert!(local.borrow_mut().assign("x", Value::Number(2.0)));
        assert_eq!(global.borrow().get("x"), Some(Value::Number(2.0)));
        assert!(!local.borrow_mut().assign("missing", Value::Null));
    }

    #[test]
    fn declare_keeps_existing_values() {
        let env = Environment::shared(None);
        env.borrow_mut().define("a", Value::Bool(true));
        env.borrow_mut().declare("a");
        env.borrow_mut().declare("b");
        assert_eq!(env.borrow().get("a"), Some(Value::Bool(true)));
        assert_eq!(env.borrow().get("b"), Some(Value::Undefined));
    }

    #[test]
    fn globals_land_at_the_root() {
        let global = Environment::shared(None);
        let local = Environment::shared(Some(global.clone()));
        local.borrow_mut().define_global("g", Value::Null);
        assert!(global.borrow().values.contains_key("g"));
        assert!(!local.borrow().values.contains_key("g"));
    }

    #[test]
    fn strictness_is_inherited() {
        let global = Environment::shared(None);
        global.borrow_mut().strict = true;
        let local = Environment::shared(Some(global));
        assert!(local.borrow().strict);
    }
}
