//! The interactive read loop: one line in, rendered AST out.
use std::io::{self, BufRead, Write};

use term_grid::{Cell, Direction, Filling, Grid, GridOptions};

use crate::assembler::codegen::Backend;
use crate::assembler::config::Limits;
use crate::assembler::diagnostics::Diagnostics;
use crate::assembler::error::Error;
use crate::assembler::lexer::{Lexer, Token};
use crate::assembler::parser::Parser;

pub const BANNER: &str = "Simple Assembly Compiler";
pub const INSTRUCTIONS: &str = "Enter assembly code (type 'exit' to quit):";
pub const PROMPT: &str = "> ";
pub const EXIT: &str = "exit";

pub struct Session<D: Diagnostics, B: Backend> {
    lexer: Lexer,
    sink: D,
    backend: B,
    show_tokens: bool,
}

impl<D: Diagnostics, B: Backend> Session<D, B> {
    pub fn new(limits: Limits, sink: D, backend: B) -> Self {
        Session { lexer: Lexer::new(limits), sink, backend, show_tokens: false }
    }

    /// Prefix every rendered line with a table of its tokens.
    pub fn show_tokens(mut self, show: bool) -> Self {
        self.show_tokens = show;
        self
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn limits(&self) -> &Limits {
        self.lexer.limits()
    }

    /// Runs one line through lexer, parser and backend, appending the
    /// lines to display to `out`. Failures are reported to the sink and
    /// returned; whatever reached `out` before the failure stays there.
    pub fn process_line(&mut self, line: &str, out: &mut Vec<String>) -> Result<(), Error> {
        let tokens = match self.lexer.tokenize(line, &mut self.sink) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.sink.report(format!("tokenization failed: {}", e));
                return Err(e);
            }
        };

        if self.show_tokens {
            out.extend(token_table(&tokens).lines().map(str::to_owned));
        }

        let ast = match Parser::new(tokens).run(&mut self.sink) {
            Ok(ast) => ast,
            Err(e) => {
                self.sink.report(format!("AST construction failed: {}", e));
                return Err(e);
            }
        };

        if ast.is_empty() {
            debug!("nothing to do for `{}`", line);
        } else {
            out.extend(ast.render());
            self.backend.generate(&ast);
        }
        ast.dispose();

        Ok(())
    }
}

/// Lays the tokens out as `index kind text` rows.
fn token_table(tokens: &[Token]) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:   Filling::Spaces(1),
        direction: Direction::LeftToRight,
    });

    for (idx, token) in tokens.iter().enumerate() {
        grid.add(Cell::from(format!("{:02}:", idx)));
        grid.add(Cell::from(format!("{:?}", token.kind)));
        grid.add(Cell::from(format!("`{}`", token.text)));
    }

    grid.fit_into_columns(3).to_string()
}

/// Prints the banner, then prompts for and processes lines until `exit`
/// or end of input.
pub fn run<R, W, D, B>(mut input: R, mut output: W, session: &mut Session<D, B>) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    D: Diagnostics,
    B: Backend,
{
    writeln!(output, "{}", BANNER)?;
    writeln!(output, "{}", INSTRUCTIONS)?;

    let max_len = session.limits().max_line_length;
    let mut buf: Vec<u8> = Vec::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(output)?;
            break;
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        let mut line = match String::from_utf8(buf.clone()) {
            Ok(line) => line,
            Err(_) => {
                warn!("input line is not valid UTF-8, replacing the bad bytes");
                String::from_utf8_lossy(&buf).into_owned()
            }
        };

        if let Some((idx, _)) = line.char_indices().nth(max_len) {
            warn!("input line longer than {} characters, ignoring the rest", max_len);
            line.truncate(idx);
        }

        if line == EXIT {
            info!("exit requested");
            break;
        }

        let mut rendered = Vec::new();
        let result = session.process_line(&line, &mut rendered);
        for text in rendered {
            writeln!(output, "{}", text)?;
        }
        if let Err(e) = result {
            writeln!(output, "error: {}", e)?;
        }
    }

    Ok(())
}
