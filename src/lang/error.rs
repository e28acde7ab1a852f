use super::{Column, LineNumber};
use thiserror::Error;

/// A diagnostic with an error code, an optional source line and a column
/// span. Parse and runtime failures are aggregated as `Vec<Error>`.
#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    /// Fatal errors abort the run loop instead of letting execution
    /// continue to the next scheduled command.
    pub fn is_fatal(&self) -> bool {
        matches!(self.code, ErrorCode::ZeroStep | ErrorCode::StepLimit)
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: line,
            column: self.column.clone(),
            message: self.message,
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: column.clone(),
            message: self.message,
        }
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: self.column.clone(),
            message,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("SYNTAX ERROR")]
    SyntaxError,
    #[error("TYPE MISMATCH")]
    TypeMismatch,
    #[error("UNDEFINED VARIABLE")]
    UndefinedVariable,
    #[error("DUPLICATE VARIABLE")]
    DuplicateVariable,
    #[error("UNDEFINED METHOD")]
    UndefinedMethod,
    #[error("ILLEGAL CALL")]
    IllegalCall,
    #[error("BLOCK MISMATCH")]
    BlockMismatch,
    #[error("SUBSCRIPT OUT OF RANGE")]
    SubscriptOutOfRange,
    #[error("ILLEGAL VALUE")]
    IllegalValue,
    #[error("DIVISION BY ZERO")]
    DivisionByZero,
    #[error("OVERFLOW")]
    Overflow,
    #[error("ZERO STEP")]
    ZeroStep,
    #[error("RETURN WITHOUT CALL")]
    ReturnWithoutCall,
    #[error("STEP LIMIT")]
    StepLimit,
    #[error("INTERNAL ERROR")]
    InternalError,
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(line_number) = self.line_number {
            write!(f, " IN LINE {}", line_number)?;
        }
        if self.column != (0..0) {
            write!(f, " ({}..{})", self.column.start, self.column.end)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
