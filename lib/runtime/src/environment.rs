use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{get_builtins, Builtin, Value};

/// `$font-size` and `$font_size` name the same variable.
pub fn normalize_name(name: &str) -> String {
    name.replace('-', "_")
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    outer: Option<Rc<RefCell<Environment>>>,
    vars: HashMap<String, Value>,
    functions: HashMap<String, Builtin>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment::default()
    }

    /// Top level scope with the builtin functions defined.
    pub fn global() -> Environment {
        let mut env = Environment::new();
        env.extend_functions(get_builtins());
        env
    }

    pub fn with_outer(outer: Rc<RefCell<Environment>>) -> Environment {
        Environment {
            outer: Some(outer),
            vars: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    pub fn extend(&mut self, vals: HashMap<String, Value>) {
        for (k, v) in vals {
            self.define(&k, v);
        }
    }

    pub fn extend_functions(&mut self, functions: HashMap<String, Builtin>) {
        for (k, f) in functions {
            self.functions.insert(normalize_name(&k), f);
        }
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.vars.insert(normalize_name(name), value);
    }

    /// Rebinds the variable in the scope that defines it, or defines it here.
    pub fn assign(&mut self, name: &str, value: Value) {
        let key = normalize_name(name);
        if self.vars.contains_key(&key) {
            self.vars.insert(key, value);
            return;
        }

        match &self.outer {
            Some(env) if env.borrow().has_var(name) => env.borrow_mut().assign(name, value),
            _ => {
                self.vars.insert(key, value);
            }
        }
    }

    pub fn has_var(&self, name: &str) -> bool {
        self.var(name).is_some()
    }

    pub fn var(&self, name: &str) -> Option<Value> {
        match self.vars.get(&normalize_name(name)) {
            Some(v) => Some(v.clone()),
            None => match &self.outer {
                Some(env) => env.borrow().var(name),
                None => None,
            },
        }
    }

    pub fn function(&self, name: &str) -> Option<Builtin> {
        match self.functions.get(&normalize_name(name)) {
            Some(f) => Some(*f),
            None => match &self.outer {
                Some(env) => env.borrow().function(name),
                None => None,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::Environment;
    use crate::{Builtin, Value};

    #[test]
    fn names_are_normalized() {
        let mut env = Environment::new();
        env.define("font-size", Value::number(12.0));
        assert_eq!(env.var("font_size"), Some(Value::number(12.0)));
    }

    #[test]
    fn lookups_walk_outer_scopes() {
        let globals = Rc::new(RefCell::new(Environment::global()));
        globals.borrow_mut().define("x", Value::number(1.0));

        let inner = Environment::with_outer(globals.clone());
        assert_eq!(inner.var("x"), Some(Value::number(1.0)));
        assert_eq!(inner.function("type-of"), Some(Builtin::TypeOf));
        assert_eq!(inner.var("y"), None);
        assert_eq!(inner.function("nope"), None);
    }

    #[test]
    fn assign_rebinds_defining_scope() {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("x", Value::number(1.0));

        let mut inner = Environment::with_outer(globals.clone());
        inner.assign("x", Value::number(2.0));
        inner.assign("y", Value::number(3.0));

        assert_eq!(globals.borrow().var("x"), Some(Value::number(2.0)));
        assert_eq!(globals.borrow().var("y"), None);
        assert_eq!(inner.var("y"), Some(Value::number(3.0)));
    }
}
