//! Tree-walking interpreter over the DSQL AST.
//!
//! The [`Evaluator`] visits statements one at a time, turns WHERE expressions
//! into [`Condition`] values, and hands every SELECT and INSERT to its
//! [`Backend`]. Results accumulate on [`Context::stack`], one per statement.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::context::{Context, Options};
use super::error::EvalError;
use super::extension::{self, Extension};
use super::value::{Condition, Scalar, Value};
use crate::backend::Backend;
use crate::sql::{Expr, Insert, NodeRef, Select, SourceElements};

/// Outcome of visiting one node.
struct Visit {
    value: Value,
    /// Whether an extension handled the node instead of the evaluator.
    claimed: bool,
}

/// Interpreter bound to a backend and a list of extensions.
///
/// Statements run strictly in order and every backend call is awaited before
/// the next one starts. Within an expression, the left operand is evaluated
/// before the right one.
pub struct Evaluator<B: Backend> {
    backend: B,
    extensions: Vec<Arc<dyn Extension>>,
    options: Options,
}

impl<B: Backend> Evaluator<B> {
    /// Creates an evaluator with default options and no extensions.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            extensions: Vec::new(),
            options: Options::default(),
        }
    }

    /// Sets the options used by [`execute`](Self::execute).
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Registers an extension. Hooks run in registration order.
    pub fn plugin<E: Extension + 'static>(mut self, extension: E) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    /// Registers an already shared extension.
    pub fn plugin_arc(mut self, extension: Arc<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a program against `ctx`, returning one result per statement.
    ///
    /// SELECT yields [`Value::Rows`], INSERT yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Stops at the first failing statement. Results of the statements before
    /// it stay on `ctx.stack`, and their INSERTs are not rolled back.
    pub async fn run(
        &self,
        ast: &SourceElements,
        ctx: &mut Context,
    ) -> Result<Vec<Value>, EvalError> {
        self.visit(Some(NodeRef::SourceElements(ast)), ctx).await?;
        Ok(ctx.stack.clone())
    }

    /// Runs a program in a fresh context built from this evaluator's options.
    pub async fn execute(&self, ast: &SourceElements) -> Result<Vec<Value>, EvalError> {
        let mut ctx = Context::new(self.options.clone());
        self.visit(Some(NodeRef::SourceElements(ast)), &mut ctx)
            .await?;
        Ok(ctx.stack)
    }

    /// Visits a node and returns its value. An absent node yields [`Value::Null`].
    pub async fn visit(
        &self,
        node: Option<NodeRef<'_>>,
        ctx: &mut Context,
    ) -> Result<Value, EvalError> {
        match node {
            Some(node) => Ok(self.visit_node(node, ctx).await?.value),
            None => Ok(Value::Null),
        }
    }

    /// Runs the extension hooks around default handling of one node.
    ///
    /// Uses `Pin<Box<...>>` to break the recursive future cycle
    /// (visit_node -> dispatch -> visit_node).
    fn visit_node<'a>(
        &'a self,
        node: NodeRef<'a>,
        ctx: &'a mut Context,
    ) -> Pin<Box<dyn Future<Output = Result<Visit, EvalError>> + Send + 'a>> {
        Box::pin(async move {
            log::debug!("visit {}", node.kind());

            extension::before_visit(&self.extensions, node, ctx).await?;

            let visit = match extension::claim(&self.extensions, node, ctx).await {
                Some(value) => {
                    log::debug!("{} claimed by extension", node.kind());
                    Visit {
                        value,
                        claimed: true,
                    }
                }
                None => Visit {
                    value: self.dispatch(node, ctx).await?,
                    claimed: false,
                },
            };

            extension::after_visit(&self.extensions, node, ctx).await?;
            Ok(visit)
        })
    }

    /// Default handling, one rule per node kind.
    async fn dispatch(&self, node: NodeRef<'_>, ctx: &mut Context) -> Result<Value, EvalError> {
        match node {
            NodeRef::SourceElements(root) => {
                for stmt in &root.statements {
                    let visit = self.visit_node(stmt.into(), ctx).await?;
                    // A claimed statement never reached its own handler.
                    if visit.claimed {
                        ctx.stack.push(visit.value);
                    }
                }
                Ok(Value::Null)
            }
            NodeRef::Select(select) => self.visit_select(select, ctx).await,
            NodeRef::Insert(insert) => self.visit_insert(insert, ctx).await,
            NodeRef::List(list) => Ok(Value::List(list.items.clone())),
            NodeRef::Expr(expr) => self.visit_expr(expr, ctx).await,
        }
    }

    async fn visit_select(&self, select: &Select, ctx: &mut Context) -> Result<Value, EvalError> {
        let condition = match self.visit(select.condition.as_ref().map(NodeRef::Expr), ctx).await? {
            Value::Null => None,
            Value::Condition(condition) => Some(*condition),
            other => {
                return Err(EvalError::InvalidCondition {
                    found: other.kind().to_string(),
                });
            }
        };

        let group_by = select.group_by.as_ref().map(|list| list.items.as_slice());

        log::debug!("select from {}", select.table);
        let rows = self
            .backend
            .select(
                &select.table,
                &select.columns.items,
                condition.as_ref(),
                group_by,
            )
            .await?;

        ctx.stack.push(Value::Rows(rows));
        Ok(Value::Null)
    }

    async fn visit_insert(&self, insert: &Insert, ctx: &mut Context) -> Result<Value, EvalError> {
        let values = match self.visit(Some(NodeRef::Expr(&insert.values)), ctx).await? {
            Value::Array(values) => values
                .into_iter()
                .map(|value| {
                    let found = value.kind();
                    value.into_scalar().ok_or_else(|| EvalError::InvalidValue {
                        found: found.to_string(),
                    })
                })
                .collect::<Result<Vec<Scalar>, EvalError>>()?,
            other => {
                return Err(EvalError::InvalidValue {
                    found: other.kind().to_string(),
                });
            }
        };

        let columns = insert
            .columns
            .as_ref()
            .map_or(&[][..], |list| list.items.as_slice());

        log::debug!("insert into {}", insert.table);
        self.backend
            .insert(&insert.table, columns, &values)
            .await?;

        ctx.stack.push(Value::Null);
        Ok(Value::Null)
    }

    async fn visit_expr(&self, expr: &Expr, ctx: &mut Context) -> Result<Value, EvalError> {
        match expr {
            Expr::Identifier(name) => Ok(Value::Name(name.clone())),
            Expr::Number(n) => Ok(Value::Scalar(Scalar::Number(*n))),
            Expr::String(s) => Ok(Value::Scalar(Scalar::String(s.clone()))),
            Expr::Boolean(b) => Ok(Value::Scalar(Scalar::Boolean(*b))),
            Expr::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.visit(Some(NodeRef::Expr(element)), ctx).await?);
                }
                Ok(Value::Array(values))
            }
            Expr::BinaryOp { left, op, right } => {
                let left = self.visit(Some(NodeRef::Expr(left)), ctx).await?;
                let right = self.visit(Some(NodeRef::Expr(right)), ctx).await?;
                Ok(Condition::new(left, op.as_str(), right).into())
            }
        }
    }
}
