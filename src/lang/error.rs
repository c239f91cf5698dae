use super::{Column, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    offset: Option<usize>,
    message: String,
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
    ($err:ident, @$offset:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_offset($offset)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, @$offset:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_offset($offset)
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
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            offset: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn in_line_number(mut self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        self.line_number = line;
        self
    }

    pub fn in_column(mut self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        self.column = column.clone();
        self
    }

    /// Byte-code offset of the instruction that failed.
    pub fn at_offset(mut self, offset: usize) -> Error {
        self.offset = Some(offset);
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Error {
        self.message = message.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    UnterminatedString = 3,
    InvalidNumber = 4,
    Overflow = 6,
    DivisionByZero = 11,
    TypeMismatch = 13,
    StackOverflow = 20,
    StackUnderflow = 21,
    UnknownOpcode = 22,
    UnknownOperand = 23,
    TruncatedInstruction = 24,
    MissingReturn = 25,
    WrongImmediate = 26,
    Break = 27,
    InternalError = 51,
    FileNotFound = 53,
    DiskIoError = 57,
    BadChunkFile = 60,
    ChecksumMismatch = 61,
    UnsupportedVersion = 62,
    InvalidArgument = 70,
    CompilerUnavailable = 71,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            SyntaxError => "SYNTAX ERROR",
            UnterminatedString => "UNTERMINATED STRING",
            InvalidNumber => "INVALID NUMBER",
            Overflow => "OVERFLOW",
            DivisionByZero => "DIVISION BY ZERO",
            TypeMismatch => "TYPE MISMATCH",
            StackOverflow => "STACK OVERFLOW",
            StackUnderflow => "STACK UNDERFLOW",
            UnknownOpcode => "UNKNOWN OPCODE",
            UnknownOperand => "UNKNOWN OPERAND",
            TruncatedInstruction => "TRUNCATED INSTRUCTION",
            MissingReturn => "MISSING RETURN",
            WrongImmediate => "WRONG IMMEDIATE",
            Break => "BREAK",
            InternalError => "INTERNAL ERROR",
            FileNotFound => "FILE NOT FOUND",
            DiskIoError => "DISK I/O ERROR",
            BadChunkFile => "BAD CHUNK FILE",
            ChecksumMismatch => "CHECKSUM MISMATCH",
            UnsupportedVersion => "UNSUPPORTED VERSION",
            InvalidArgument => "INVALID ARGUMENT",
            CompilerUnavailable => "COMPILER NOT AVAILABLE",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN LINE {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if let Some(offset) = self.offset {
            suffix.push_str(&format!(" AT {:04}", offset));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", self.code, suffix)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        let msg = error.to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => Error::new(ErrorCode::FileNotFound).message(msg),
            _ => Error::new(ErrorCode::DiskIoError).message(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_offset() {
        let e = error!(DivisionByZero, @12);
        assert_eq!(e.to_string(), "DIVISION BY ZERO AT 0012");
    }

    #[test]
    fn test_display_with_line_column_and_message() {
        let e = error!(InvalidNumber, Some(3), ..&(4..6); "missing exponent digits");
        assert_eq!(
            e.to_string(),
            "INVALID NUMBER IN LINE 3 (4..6); missing exponent digits"
        );
    }

    #[test]
    fn test_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).code(), ErrorCode::FileNotFound);
    }
}
