//! The Parser module takes a line's token sequence from the lexer
//! and converts it into an AST.
use super::ast::{Ast, Node};
use super::diagnostics::Diagnostics;
use super::error::{Error, Mnemonic};
use super::lexer::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    /// Index of the first unusable token (the end marker, or the length).
    end: usize,
    cursor: usize,
    ast: Ast,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .iter()
            .position(|t| t.kind == TokenKind::EndOfInput)
            .unwrap_or_else(|| tokens.len());
        Parser { tokens, end, cursor: 0, ast: Ast::new() }
    }

    /// Run the parser, consuming itself and the tokens, and return the AST.
    /// A truncated instruction discards everything built so far.
    pub fn run(mut self, sink: &mut dyn Diagnostics) -> Result<Ast, Error> {
        loop {
            match self.instruction() {
                Ok(Some(node)) => {
                    match node.mnemonic() {
                        Some(mnemonic) => debug!("parsed {} instruction `{}`", mnemonic, node),
                        None => debug!("parsed label `{}`", node),
                    }
                    self.ast.push(node);
                }
                Ok(None) => break,
                Err(e) => {
                    sink.report(e.to_string());
                    return Err(e);
                }
            }
        }

        Ok(self.ast)
    }

    /// Consumes tokens until a node is produced or the line runs out.
    fn instruction(&mut self) -> Result<Option<Node>, Error> {
        while let Some(token) = self.consume() {
            let position = self.cursor - 1;
            if let Some(mnemonic) = token.kind.mnemonic() {
                return self.operation(mnemonic, position).map(Some);
            }
            match token.kind {
                TokenKind::Label => return Ok(Some(Node::Label(token.text))),
                // Stray operands and invalid fields produce nothing.
                _ => trace!("skipping {:?} `{}` at position {}", token.kind, token.text, position),
            }
        }
        Ok(None)
    }

    fn operation(&mut self, mnemonic: Mnemonic, position: usize) -> Result<Node, Error> {
        // `operands` guarantees exactly `arity` entries.
        let mut operands = self.operands(mnemonic, position)?.into_iter();
        let first = operands.next().unwrap_or_default();
        let second = operands.next().unwrap_or_default();

        Ok(match mnemonic {
            Mnemonic::Mov => Node::Mov { dest: first, src: second },
            Mnemonic::Add => Node::Add { dest: first, src: second },
            Mnemonic::Sub => Node::Sub { dest: first, src: second },
            Mnemonic::Jmp => Node::Jmp(first),
        })
    }

    /// Takes the next `arity` tokens by position, whatever their kind.
    fn operands(&mut self, mnemonic: Mnemonic, position: usize) -> Result<Vec<String>, Error> {
        let arity = mnemonic.arity();
        let available = self.remaining();
        if available < arity {
            return Err(Error::TruncatedInstruction { mnemonic, position, arity, available });
        }

        let mut operands = Vec::with_capacity(arity);
        for _ in 0..arity {
            match self.consume() {
                Some(token) => operands.push(token.text),
                None => {
                    return Err(Error::TruncatedInstruction { mnemonic, position, arity, available })
                }
            }
        }
        Ok(operands)
    }

    /// Usable tokens left before the end marker.
    #[inline]
    fn remaining(&self) -> usize {
        self.end.saturating_sub(self.cursor)
    }

    /// Takes the token under the cursor and advances.
    /// Returns None once the end marker is reached.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        if self.cursor >= self.end {
            return None;
        }
        let token = std::mem::replace(&mut self.tokens[self.cursor], Token::end());
        self.cursor += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::config::Limits;
    use super::super::lexer::Lexer;

    fn tokens(line: &str) -> Vec<Token> {
        let mut sink: Vec<String> = Vec::new();
        Lexer::new(Limits::default()).tokenize(line, &mut sink).unwrap()
    }

    fn parse(line: &str) -> Result<Ast, Error> {
        let mut sink: Vec<String> = Vec::new();
        Parser::new(tokens(line)).run(&mut sink)
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse(""), Ok(Ast::new()));
        assert_eq!(parse("   "), Ok(Ast::new()));

        let mut sink: Vec<String> = Vec::new();
        assert_eq!(Parser::new(Vec::new()).run(&mut sink), Ok(Ast::new()));
    }

    #[test]
    fn test_binary_ops() {
        assert_eq!(parse("MOV R1 R2").unwrap().nodes(), &[
            Node::Mov { dest: "R1".to_owned(), src: "R2".to_owned() },
        ]);
        assert_eq!(parse("ADD R1 5").unwrap().nodes(), &[
            Node::Add { dest: "R1".to_owned(), src: "5".to_owned() },
        ]);
        assert_eq!(parse("SUB R1 5").unwrap().nodes(), &[
            Node::Sub { dest: "R1".to_owned(), src: "5".to_owned() },
        ]);
    }

    #[test]
    fn test_jmp_and_label() {
        assert_eq!(parse("JMP loop:").unwrap().nodes(), &[Node::Jmp("loop:".to_owned())]);
        assert_eq!(parse("loop:").unwrap().nodes(), &[Node::Label("loop:".to_owned())]);
    }

    #[test]
    fn test_operands_taken_by_position() {
        // Operand kinds are not checked.
        assert_eq!(parse("MOV 1 2").unwrap().nodes(), &[
            Node::Mov { dest: "1".to_owned(), src: "2".to_owned() },
        ]);
        // A mnemonic in operand position is just operand text.
        assert_eq!(parse("MOV ADD x:").unwrap().nodes(), &[
            Node::Mov { dest: "ADD".to_owned(), src: "x:".to_owned() },
        ]);
        assert_eq!(parse("JMP R3").unwrap().nodes(), &[Node::Jmp("R3".to_owned())]);
    }

    #[test]
    fn test_sequence_order() {
        let ast = parse("start: MOV R1 R2 ADD R1 1 JMP start:").unwrap();
        assert_eq!(ast.render(), vec![
            "LABEL: start:".to_owned(),
            "MOV R1, R2".to_owned(),
            "ADD R1, 1".to_owned(),
            "JMP start:".to_owned(),
        ]);
    }

    #[test]
    fn test_skips_stray_tokens() {
        assert_eq!(parse("NOP R1 R2"), Ok(Ast::new()));
        assert_eq!(parse("R1 5 -3 ???"), Ok(Ast::new()));
        assert_eq!(parse("R1 MOV R2 R3 7").unwrap().nodes(), &[
            Node::Mov { dest: "R2".to_owned(), src: "R3".to_owned() },
        ]);
    }

    #[test]
    fn test_truncated() {
        assert_eq!(parse("MOV R1"), Err(Error::TruncatedInstruction {
            mnemonic: Mnemonic::Mov,
            position: 0,
            arity: 2,
            available: 1,
        }));
        assert_eq!(parse("ADD"), Err(Error::TruncatedInstruction {
            mnemonic: Mnemonic::Add,
            position: 0,
            arity: 2,
            available: 0,
        }));
        assert_eq!(parse("start: SUB R1 R2 JMP"), Err(Error::TruncatedInstruction {
            mnemonic: Mnemonic::Jmp,
            position: 4,
            arity: 1,
            available: 0,
        }));
    }

    #[test]
    fn test_truncated_is_reported() {
        let mut sink: Vec<String> = Vec::new();
        let result = Parser::new(tokens("loop: MOV R1")).run(&mut sink);
        assert!(result.is_err());
        assert_eq!(sink, vec!["MOV at position 1 needs 2 operand(s) but only 1 remain".to_owned()]);
    }

    #[test]
    fn test_stops_at_end_marker() {
        let tokens = vec![
            Token::new(TokenKind::Jmp, "JMP"),
            Token::end(),
            Token::new(TokenKind::Register, "R1"),
        ];
        let mut sink: Vec<String> = Vec::new();
        assert_eq!(Parser::new(tokens).run(&mut sink), Err(Error::TruncatedInstruction {
            mnemonic: Mnemonic::Jmp,
            position: 0,
            arity: 1,
            available: 0,
        }));

        // Hand-built sequences without a marker end at their length.
        let tokens = vec![
            Token::new(TokenKind::Jmp, "JMP"),
            Token::new(TokenKind::Label, "out:"),
        ];
        assert_eq!(
            Parser::new(tokens).run(&mut sink).unwrap().nodes(),
            &[Node::Jmp("out:".to_owned())]
        );
    }

    #[test]
    fn test_round_trip() {
        for line in &["MOV R1 R2", "ADD  R4\t-9", "SUB R0 0x10", "JMP end:"] {
            let ast = parse(line).unwrap();
            let fields: Vec<&str> = line.split_whitespace().collect();
            let expected = match fields.len() {
                3 => format!("{} {}, {}", fields[0], fields[1], fields[2]),
                _ => format!("{} {}", fields[0], fields[1]),
            };
            assert_eq!(ast.render(), vec![expected]);
        }
    }
}
