//! Control flow: if
//!
//! `if` is an ordinary builtin, not a special form. Its branches arrive
//! as Q-expressions (already evaluated to themselves, since Q-expressions
//! are inert) and `if` converts the chosen one to an S-expression before
//! handing it to the evaluator.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// `(if (== 1 1) {1} {2})` => `1`. The condition is truthy when nonzero.
pub fn builtin_if(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::TooFewArguments {
            function: "if".to_string(),
            expected: 3,
            actual: args.len(),
        });
    }
    let else_branch = args.remove(2);
    let then_branch = args.remove(1);
    let cond = args.remove(0);

    let truthy = match cond {
        Value::Number(n) => n != 0,
        other => {
            return Err(EvalError::type_error("if", "Number", other.type_name(), 0));
        }
    };

    let branch = if truthy { then_branch } else { else_branch };
    match branch {
        Value::QExpr(items) => crate::eval::eval(env, Value::SExpr(items)),
        other => Err(EvalError::type_error("if", "Q-Expression", other.type_name(), 1)),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.put("if".to_string(), Value::builtin("if", builtin_if));
}
