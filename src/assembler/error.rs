//! Errors raised while turning a line into an AST.
use std::fmt;

/// The four instruction mnemonics the notation knows about.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    Mov,
    Add,
    Sub,
    Jmp,
}

impl Mnemonic {
    /// Number of operand tokens the instruction consumes.
    pub fn arity(&self) -> usize {
        use Mnemonic::*;
        match self {
            Mov | Add | Sub => 2,
            Jmp             => 1,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Mnemonic::*;
        match self {
            Mov => write!(f, "MOV"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Jmp => write!(f, "JMP"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// A field matched none of the classification rules. Reported, never returned.
    InvalidToken { text: String, position: usize },
    /// An instruction ran out of operands before the end of the line.
    TruncatedInstruction {
        mnemonic: Mnemonic,
        position: usize,
        arity: usize,
        available: usize,
    },
    /// The line holds more fields than the token buffer allows.
    CapacityExceeded { fields: usize, max: usize },
    InvalidLimits(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;
        match self {
            InvalidToken { text, position } => {
                write!(f, "invalid token `{}` at position {}", text, position)
            }
            TruncatedInstruction { mnemonic, position, arity, available } => write!(
                f,
                "{} at position {} needs {} operand(s) but only {} remain",
                mnemonic, position, arity, available
            ),
            CapacityExceeded { fields, max } => {
                write!(f, "line has {} fields, at most {} are allowed", fields, max)
            }
            InvalidLimits(reason) => write!(f, "invalid limits: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(Mnemonic::Mov.arity(), 2);
        assert_eq!(Mnemonic::Add.arity(), 2);
        assert_eq!(Mnemonic::Sub.arity(), 2);
        assert_eq!(Mnemonic::Jmp.arity(), 1);
    }

    #[test]
    fn test_display() {
        let e = Error::TruncatedInstruction {
            mnemonic: Mnemonic::Mov,
            position: 0,
            arity: 2,
            available: 1,
        };
        assert_eq!(e.to_string(), "MOV at position 0 needs 2 operand(s) but only 1 remain");

        let e = Error::CapacityExceeded { fields: 120, max: 99 };
        assert_eq!(e.to_string(), "line has 120 fields, at most 99 are allowed");

        let e = Error::InvalidToken { text: "NOP".to_owned(), position: 3 };
        assert_eq!(e.to_string(), "invalid token `NOP` at position 3");
    }
}
