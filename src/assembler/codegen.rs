//! Hand-off point for emitting a target representation.
//!
//! No target format exists yet. The stub only records that it was asked.
use super::ast::Ast;

pub trait Backend {
    /// Called once for every line that parsed into a non-empty AST.
    fn generate(&mut self, ast: &Ast);
}

#[derive(Default, Debug)]
pub struct StubBackend {
    invocations: usize,
}

impl StubBackend {
    pub fn new() -> Self {
        StubBackend { invocations: 0 }
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }
}

impl Backend for StubBackend {
    fn generate(&mut self, ast: &Ast) {
        self.invocations += 1;
        info!("Generating code...");
        let instructions = ast.nodes().iter().filter(|node| node.mnemonic().is_some()).count();
        debug!(
            "code generation requested for {} instruction(s) and {} label(s)",
            instructions,
            ast.len() - instructions
        );
    }
}
