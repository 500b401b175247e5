//! This AST describes one parsed line.
//!
//! A line holds straight-line code only: instructions and labels in the
//! order they were written, with no nesting.
//!
//! Supported forms:
//!
//! ```nasm
//! MOV dest src   ; rendered as "MOV dest, src"
//! ADD dest src   ; rendered as "ADD dest, src"
//! SUB dest src   ; rendered as "SUB dest, src"
//! JMP target     ; rendered as "JMP target"
//! name:          ; rendered as "LABEL: name:"
//! ```
//!
//! Operands are kept as the raw field text. Whether `dest` is really a
//! register or `target` a label is not checked here.

use std::fmt;

use super::error::Mnemonic;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    Label(String),
    Mov { dest: String, src: String },
    Add { dest: String, src: String },
    Sub { dest: String, src: String },
    Jmp(String),
}

impl Node {
    /// `None` for labels.
    pub fn mnemonic(&self) -> Option<Mnemonic> {
        match self {
            Node::Label(_)     => None,
            Node::Mov { .. }   => Some(Mnemonic::Mov),
            Node::Add { .. }   => Some(Mnemonic::Add),
            Node::Sub { .. }   => Some(Mnemonic::Sub),
            Node::Jmp(_)       => Some(Mnemonic::Jmp),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Label(name) => write!(f, "LABEL: {}", name),
            Node::Mov { dest, src } => write!(f, "{} {}, {}", Mnemonic::Mov, dest, src),
            Node::Add { dest, src } => write!(f, "{} {}, {}", Mnemonic::Add, dest, src),
            Node::Sub { dest, src } => write!(f, "{} {}, {}", Mnemonic::Sub, dest, src),
            Node::Jmp(target)       => write!(f, "{} {}", Mnemonic::Jmp, target),
        }
    }
}

/// The nodes of one line, in source order.
///
/// Not `Clone`: an AST has exactly one owner, and `dispose` takes it by
/// value, so nothing can render it after it has been released.
#[derive(PartialEq, Eq, Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Ast { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// One display line per node, in order.
    pub fn render(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.to_string()).collect()
    }

    /// Releases every node and its operand text.
    pub fn dispose(self) {
        trace!("releasing {} AST node(s)", self.nodes.len());
        drop(self);
    }
}

impl From<Vec<Node>> for Ast {
    fn from(nodes: Vec<Node>) -> Self {
        Ast { nodes }
    }
}
