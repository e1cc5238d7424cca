//! # Built-in functions
//!
//! The root environment's starting vocabulary, grouped the way the
//! language groups them conceptually:
//!
//! - [arithmetic]: `+ - * / %`
//! - [comparison]: `== != < > <= >=`
//! - [lists]: `list head tail join eval cons len`
//! - [control]: `if`
//! - [define]: `def = \`

use crate::env::Environment;
use std::rc::Rc;

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod define;
pub mod lists;

/// Registers every built-in into the root environment.
pub fn register_all(env: &Rc<Environment>) {
    arithmetic::register(env);
    comparison::register(env);
    lists::register(env);
    control::register(env);
    define::register(env);
}
