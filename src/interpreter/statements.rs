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

/*!
 * Statement executor
 * ------------------
 *
 * Handles declarations, control flow, try / catch / finally, throw and
 * expression statements. Expressions live in `expressions.rs`, calls in
 * `calls.rs`.
 */

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::interpreter::environment::{Environment, FunctionDef};
use crate::interpreter::expressions::eval_expr;
use crate::interpreter::helpers::is_truthy;
use crate::interpreter::Thrown;
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Non-exceptional control flow out of a statement. Exceptions travel on
/// the `Err` side as `Thrown`.
#[derive(Debug)]
pub enum ExecSignal {
    /// Normal fall-through execution.
    None,

    /// Early return from a function.
    Return(Value),
}

pub type ExecResult = Result<ExecSignal, Thrown>;

/* ============================================================================
 * Hoisting
 * ============================================================================
 */

/// Declares every `var` and function declaration of a body up front.
///
/// `var` is function-scoped, so blocks and branches are searched too;
/// nested function bodies are not.
pub fn hoist_declarations(body: &[Stmt], env: &Rc<RefCell<Environment>>) {
    for stmt in body {
        hoist_stmt(stmt, env);
    }
}

fn hoist_stmt(stmt: &Stmt, env: &Rc<RefCell<Environment>>) {
    match stmt {
        Stmt::Var { declarations } => {
            for decl in declarations {
                env.borrow_mut().declare(&decl.name);
            }
        }

        Stmt::Function(node) => {
            let def = FunctionDef {
                node: node.clone(),
                closure: env.clone(),
            };
            if let Some(name) = &node.name {
                env.borrow_mut().define(name.clone(), Value::Function(Rc::new(def)));
            }
        }

        Stmt::Block(body) => hoist_declarations(body, env),

        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            hoist_stmt(then_branch, env);
            if let Some(else_branch) = else_branch {
                hoist_stmt(else_branch, env);
            }
        }

        Stmt::While { body, .. } => hoist_stmt(body, env),

        Stmt::Try {
            try_block,
            catch_block,
            finally_block,
            ..
        } => {
            hoist_declarations(try_block, env);
            if let Some(block) = catch_block {
                hoist_declarations(block, env);
            }
            if let Some(block) = finally_block {
                hoist_declarations(block, env);
            }
        }

        Stmt::Expression(_) | Stmt::Return(_) | Stmt::Throw { .. } | Stmt::Empty => {}
    }
}

/* ============================================================================
 * Statement Execution Entry Point
 * ============================================================================
 */

/// Runs statements in order, stopping at the first `return`.
pub fn exec_block(body: &[Stmt], env: &Rc<RefCell<Environment>>) -> ExecResult {
    for stmt in body {
        if let ExecSignal::Return(value) = exec_stmt(stmt, env)? {
            return Ok(ExecSignal::Return(value));
        }
    }
    Ok(ExecSignal::None)
}

/// Executes a single statement inside the given environment.
pub fn exec_stmt(stmt: &Stmt, env: &Rc<RefCell<Environment>>) -> ExecResult {
    match stmt {
        Stmt::Expression(expr) => {
            eval_expr(expr, env)?;
            Ok(ExecSignal::None)
        }

        Stmt::Var { declarations } => {
            for decl in declarations {
                if let Some(init) = &decl.init {
                    let value = eval_expr(init, env)?;
                    // the hoisted binding may sit behind a catch scope
                    if !env.borrow_mut().assign(&decl.name, value.clone()) {
                        env.borrow_mut().define(decl.name.clone(), value);
                    }
                }
            }
            Ok(ExecSignal::None)
        }

        // bound during hoisting
        Stmt::Function(_) => Ok(ExecSignal::None),

        Stmt::Return(value) => {
            let value = match value {
                Some(expr) => eval_expr(expr, env)?,
                None => Value::Undefined,
            };
            Ok(ExecSignal::Return(value))
        }

        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            if is_truthy(&eval_expr(condition, env)?) {
                exec_stmt(then_branch, env)
            } else if let Some(else_branch) = else_branch {
                exec_stmt(else_branch, env)
            } else {
                Ok(ExecSignal::None)
            }
        }

        Stmt::While { condition, body } => {
            while is_truthy(&eval_expr(condition, env)?) {
                if let ExecSignal::Return(value) = exec_stmt(body, env)? {
                    return Ok(ExecSignal::Return(value));
                }
            }
            Ok(ExecSignal::None)
        }

        Stmt::Block(body) => exec_block(body, env),

        Stmt::Try {
            try_block,
            catch_param,
            catch_block,
            finally_block,
        } => {
            let result = match (exec_block(try_block, env), catch_param, catch_block) {
                (Err(thrown), Some(param), Some(catch_body)) => {
                    let catch_env = Environment::shared(Some(env.clone()));
                    catch_env
                        .borrow_mut()
                        .define(param.name.clone(), thrown.value);

                    exec_block(catch_body, &catch_env)
                }
                (result, _, _) => result,
            };

            // an abrupt finally overrides whatever try/catch produced
            if let Some(finally_body) = finally_block {
                match exec_block(finally_body, env)? {
                    ExecSignal::None => {}
                    signal => return Ok(signal),
                }
            }

            result
        }

        Stmt::Throw { value, span } => {
            let value = eval_expr(value, env)?;
            Err(Thrown::new(value, *span))
        }

        Stmt::Empty => Ok(ExecSignal::None),
    }
}
