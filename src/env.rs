// ABOUTME: Environment module for managing variable bindings and scopes

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the root environment. Built-ins are bound here at startup.
    pub fn new_root() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a fresh, empty frame whose parent is `parent`. Used both for
    /// ordinary call frames and for a lambda's captured frame at
    /// construction time (see DESIGN.md's closure-capture note).
    pub fn child(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// Binds `name` in this frame only, replacing any existing entry.
    pub fn put(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up `name` in this frame, then walks the parent chain. Returns
    /// a clone, since the environment always keeps its own copy of a binding.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.bindings.borrow().get(name) {
            return Some(v.clone());
        }
        self.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Binds `name` in the root (parent-less) frame of this chain.
    pub fn def_global(&self, name: String, value: Value) {
        match &self.parent {
            Some(parent) => parent.def_global(name, value),
            None => self.put(name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_get() {
        let env = Environment::new_root();
        env.put("x".to_string(), Value::Number(42));
        assert_eq!(env.get("x"), Some(Value::Number(42)));
    }

    #[test]
    fn unbound_symbol_is_none() {
        let env = Environment::new_root();
        assert_eq!(env.get("nope"), None);
    }

    #[test]
    fn shadowing_in_child_frame() {
        let parent = Environment::new_root();
        parent.put("x".to_string(), Value::Number(1));

        let child = Environment::child(&parent);
        child.put("x".to_string(), Value::Number(2));

        assert_eq!(child.get("x"), Some(Value::Number(2)));
        assert_eq!(parent.get("x"), Some(Value::Number(1)));
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = Environment::new_root();
        parent.put("y".to_string(), Value::Number(10));

        let child = Environment::child(&parent);
        assert_eq!(child.get("y"), Some(Value::Number(10)));
    }

    #[test]
    fn def_global_walks_to_root() {
        let root = Environment::new_root();
        let mid = Environment::child(&root);
        let leaf = Environment::child(&mid);

        leaf.def_global("z".to_string(), Value::Number(99));

        assert_eq!(root.get("z"), Some(Value::Number(99)));
        assert_eq!(leaf.get("z"), Some(Value::Number(99)));
    }

    #[test]
    fn a_frame_with_its_own_binding_is_unaffected_by_a_sibling_frame_rebinding() {
        // This is the property a lambda's closure relies on: once a
        // parameter is bound into the lambda's own frame, no rebinding
        // elsewhere in the chain can reach it, because `put` only ever
        // touches the frame it is called on.
        let root = Environment::new_root();
        root.put("y".to_string(), Value::Number(10));

        let call_frame = Environment::child(&root);
        call_frame.put("y".to_string(), Value::Number(10)); // bound as a param

        root.put("y".to_string(), Value::Number(20)); // later rebind elsewhere

        assert_eq!(call_frame.get("y"), Some(Value::Number(10)));
        assert_eq!(root.get("y"), Some(Value::Number(20)));
    }
}
