//! Q-expression operations: list, head, tail, join, eval
//!
//! These all operate on `Value::QExpr`, Lispy's inert, quoted list form
//! (spec 4.1). `head`/`tail` return single-element and rest-of-list
//! Q-expressions respectively, not bare elements; `eval` is the one place
//! a Q-expression is deliberately handed to the evaluator as code.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn expect_qexpr(function: &str, position: usize, v: Value) -> Result<Vec<Value>, EvalError> {
    match v {
        Value::QExpr(items) => Ok(items),
        other => Err(EvalError::type_error(
            function,
            "Q-Expression",
            other.type_name(),
            position,
        )),
    }
}

fn expect_one_arg(function: &str, args: &[Value]) -> Result<(), EvalError> {
    if args.len() != 1 {
        return Err(EvalError::TooFewArguments {
            function: function.to_string(),
            expected: 1,
            actual: args.len(),
        });
    }
    Ok(())
}

/// `(list 1 2 3)` => `{1 2 3}`.
pub fn builtin_list(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::QExpr(args))
}

/// `(head {1 2 3})` => `{1}`.
pub fn builtin_head(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    expect_one_arg("head", &args)?;
    let items = expect_qexpr("head", 0, args.remove(0))?;
    if items.is_empty() {
        return Err(EvalError::EmptyList("head".to_string()));
    }
    Ok(Value::QExpr(vec![items.into_iter().next().unwrap()]))
}

/// `(tail {1 2 3})` => `{2 3}`.
pub fn builtin_tail(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    expect_one_arg("tail", &args)?;
    let items = expect_qexpr("tail", 0, args.remove(0))?;
    if items.is_empty() {
        return Err(EvalError::EmptyList("tail".to_string()));
    }
    Ok(Value::QExpr(items.into_iter().skip(1).collect()))
}

/// `(join {1 2} {3 4})` => `{1 2 3 4}`.
pub fn builtin_join(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let mut joined = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        joined.extend(expect_qexpr("join", i, arg)?);
    }
    Ok(Value::QExpr(joined))
}

/// `(eval {+ 1 2})` => `3`. Converts the Q-expression to an S-expression
/// and evaluates it in the caller's environment.
pub fn builtin_eval(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    expect_one_arg("eval", &args)?;
    let items = expect_qexpr("eval", 0, args.remove(0))?;
    Ok(crate::eval::eval(env, Value::SExpr(items)))
}

/// `(cons 1 {2 3})` => `{1 2 3}`. Not in spec.md's built-in table; carried
/// over from the teacher's own list builtins, which offer the same
/// prepend-a-single-value operation under this name.
pub fn builtin_cons(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::TooFewArguments {
            function: "cons".to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    let rest = expect_qexpr("cons", 1, args.remove(1))?;
    let head = args.remove(0);
    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(head);
    items.extend(rest);
    Ok(Value::QExpr(items))
}

/// `(len {1 2 3})` => `3`.
pub fn builtin_len(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    expect_one_arg("len", &args)?;
    let items = expect_qexpr("len", 0, args.remove(0))?;
    Ok(Value::Number(items.len() as i64))
}

pub fn register(env: &Rc<Environment>) {
    env.put("list".to_string(), Value::builtin("list", builtin_list));
    env.put("head".to_string(), Value::builtin("head", builtin_head));
    env.put("tail".to_string(), Value::builtin("tail", builtin_tail));
    env.put("join".to_string(), Value::builtin("join", builtin_join));
    env.put("eval".to_string(), Value::builtin("eval", builtin_eval));
    env.put("cons".to_string(), Value::builtin("cons", builtin_cons));
    env.put("len".to_string(), Value::builtin("len", builtin_len));
}
