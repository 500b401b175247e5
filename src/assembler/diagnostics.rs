//! Where lexer, parser and read-loop complaints go.
//!
//! The core never touches the log file itself. Callers hand it a sink,
//! so tests can collect messages in memory while the binary routes them
//! through the `log` facade into fern's append-only file.

pub trait Diagnostics {
    fn report(&mut self, message: String);
}

/// Forwards every message to `error!`.
#[derive(Copy, Clone, Default, Debug)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn report(&mut self, message: String) {
        error!("{}", message);
    }
}

impl Diagnostics for Vec<String> {
    fn report(&mut self, message: String) {
        self.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<String> = Vec::new();
        sink.report("first".to_owned());
        sink.report("second".to_owned());
        assert_eq!(sink, vec!["first".to_owned(), "second".to_owned()]);
    }

    #[test]
    fn test_log_sink_accepts_messages() {
        // No logger is installed under test; the call must still be harmless.
        let mut sink = LogSink;
        sink.report("ignored".to_owned());
    }
}
