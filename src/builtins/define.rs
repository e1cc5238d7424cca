//! Binding forms: def, =, \
//!
//! `def` binds into the root environment (visible everywhere); `=` binds
//! into the caller's own frame only. Both take a Q-expression of symbols
//! followed by one value per symbol. `\` builds a lambda from a
//! Q-expression of formals and a Q-expression body.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Function, Lambda, Value};
use std::rc::Rc;

fn symbol_names(function: &str, qexpr: Value) -> Result<Vec<String>, EvalError> {
    let items = match qexpr {
        Value::QExpr(items) => items,
        other => {
            return Err(EvalError::type_error(function, "Q-Expression", other.type_name(), 0));
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Symbol(s) => Ok(s),
            other => Err(EvalError::ExpectedSymbol {
                function: function.to_string(),
                actual: other.type_name(),
                position: i,
            }),
        })
        .collect()
}

fn define(function: &str, args: Vec<Value>, bind: impl Fn(String, Value)) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::TooFewArguments {
            function: function.to_string(),
            expected: 1,
            actual: 0,
        });
    }
    let mut args = args.into_iter();
    let names = symbol_names(function, args.next().unwrap())?;
    let values: Vec<Value> = args.collect();
    if names.len() != values.len() {
        return Err(EvalError::NameValueCountMismatch {
            function: function.to_string(),
            symbols: names.len(),
            values: values.len(),
        });
    }
    for (name, value) in names.into_iter().zip(values) {
        bind(name, value);
    }
    Ok(Value::empty_sexpr())
}

/// `(def {x y} 1 2)` binds `x` and `y` in the global environment.
pub fn builtin_def(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    define("def", args, |name, value| env.def_global(name, value))
}

/// `(= {x} 1)` binds `x` in the caller's own frame.
pub fn builtin_assign(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    define("=", args, |name, value| env.put(name, value))
}

/// `(\ {x y} {+ x y})` builds a lambda. The formals list may end with the
/// `&` sentinel followed by a single symbol to capture remaining
/// arguments (spec 4.2.3's variadic parameter rule); that shape is
/// validated at call time in `eval::apply`, not here.
pub fn builtin_lambda(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::TooFewArguments {
            function: "\\".to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    let body = args.remove(1);
    let formals_expr = args.remove(0);
    let formals = symbol_names("\\", formals_expr)?;

    let body = match body {
        Value::QExpr(_) => body,
        other => return Err(EvalError::type_error("\\", "Q-Expression", other.type_name(), 1)),
    };

    Ok(Value::Function(Function::Lambda(Lambda {
        formals,
        body: Box::new(body),
        env: env.clone(),
    })))
}

pub fn register(env: &Rc<Environment>) {
    env.put("def".to_string(), Value::builtin("def", builtin_def));
    env.put("=".to_string(), Value::builtin("=", builtin_assign));
    env.put("\\".to_string(), Value::builtin("\\", builtin_lambda));
}
