//! Semantic errors.
//!
//! One variant per language rule, each carrying the span of the node
//! that violated it. Analysis stops at the first error.

use noxc_util::{Diagnostic, Span, Symbol, Ty};
use thiserror::Error;

/// An error produced by the semantic analyzer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Type mismatch when initializing a parameter")]
    ParamInitTypeMismatch { span: Span },

    #[error("Non-default parameter '{name}' cannot follow a parameter with a default value")]
    NonDefaultAfterDefault { name: Symbol, span: Span },

    #[error("Function '{name}' is already declared")]
    FunctionRedeclaration { name: Symbol, span: Span },

    #[error("Definition of '{name}' does not match its declared prototype")]
    PrototypeMismatch { name: Symbol, span: Span },

    #[error("Missing return statement in a non-void function")]
    MissingReturn { span: Span },

    #[error("Missing type annotation in variable declaration")]
    MissingTypeAnnotation { span: Span },

    #[error("Type mismatch when declaring a variable")]
    VarDeclTypeMismatch { span: Span },

    #[error("Type mismatch when assigning a variable")]
    AssignTypeMismatch { span: Span },

    #[error("If condition must be int or bool")]
    IfConditionType { span: Span },

    #[error("While condition must be int or bool")]
    WhileConditionType { span: Span },

    #[error("Tried to return a value from a void function")]
    ReturnValueFromVoid { span: Span },

    #[error("No return value from a non-void function")]
    MissingReturnValue { span: Span },

    #[error("Return type mismatch")]
    ReturnTypeMismatch { span: Span },

    #[error("Referenced variable is undeclared")]
    UndeclaredVariable { name: Symbol, span: Span },

    #[error("Referenced function is undefined")]
    UndefinedFunction { name: Symbol, span: Span },

    #[error("Too few arguments in call to '{callee}'")]
    TooFewArguments { callee: Symbol, span: Span },

    #[error("Too many arguments in call to '{callee}'")]
    TooManyArguments { callee: Symbol, span: Span },

    #[error("Type mismatch for parameter '{param}' in call to '{callee}'")]
    ArgumentTypeMismatch {
        param: Symbol,
        callee: Symbol,
        span: Span,
    },

    #[error("Type mismatch in binary operation: {lhs} vs {rhs}")]
    BinaryOperandMismatch { lhs: Ty, rhs: Ty, span: Span },

    #[error("Arithmetic operators require numeric operands")]
    ArithmeticOperandType { span: Span },

    #[error("Logical operators require boolean operands")]
    LogicalOperandType { span: Span },

    #[error("Bitwise operators require numeric operands")]
    BitwiseOperandType { span: Span },

    #[error("Comparison operators require comparable operands")]
    ComparisonOperandType { span: Span },

    #[error("Unary '-' requires an int or bool operand")]
    NegationOperandType { span: Span },

    #[error("Unary '!' requires an int or bool operand")]
    NotOperandType { span: Span },

    #[error("Unary '~' requires int operand")]
    BitNotOperandType { span: Span },
}

impl SemanticError {
    /// The location of the offending node.
    pub fn span(&self) -> Span {
        use SemanticError::*;
        match self {
            ParamInitTypeMismatch { span }
            | NonDefaultAfterDefault { span, .. }
            | FunctionRedeclaration { span, .. }
            | PrototypeMismatch { span, .. }
            | MissingReturn { span }
            | MissingTypeAnnotation { span }
            | VarDeclTypeMismatch { span }
            | AssignTypeMismatch { span }
            | IfConditionType { span }
            | WhileConditionType { span }
            | ReturnValueFromVoid { span }
            | MissingReturnValue { span }
            | ReturnTypeMismatch { span }
            | UndeclaredVariable { span, .. }
            | UndefinedFunction { span, .. }
            | TooFewArguments { span, .. }
            | TooManyArguments { span, .. }
            | ArgumentTypeMismatch { span, .. }
            | BinaryOperandMismatch { span, .. }
            | ArithmeticOperandType { span }
            | LogicalOperandType { span }
            | BitwiseOperandType { span }
            | ComparisonOperandType { span }
            | NegationOperandType { span }
            | NotOperandType { span }
            | BitNotOperandType { span } => *span,
        }
    }

    /// Converts into the common diagnostic form for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.span())
    }
}

pub type Result<T> = std::result::Result<T, SemanticError>;
