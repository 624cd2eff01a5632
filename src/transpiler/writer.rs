use crate::syntax::ast::Comment;

const INDENT: &str = "  ";

/// Line-oriented buffer for emitted C. Nothing leaves the buffer until the
/// caller takes it with [`CWriter::finish`].
#[derive(Debug, Default)]
pub struct CWriter {
    buf: String,
    depth: usize,
}

impl CWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Writes comments verbatim, one per line, at the current indentation.
    pub fn comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            self.line(&comment.text);
        }
    }

    pub fn statement(&mut self, text: &str) {
        self.line(&format!("{text};"));
    }

    pub fn open_function(&mut self, return_type: &str, name: &str) {
        self.line(&format!("{return_type} {name}() {{"));
        self.depth += 1;
    }

    pub fn close_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
