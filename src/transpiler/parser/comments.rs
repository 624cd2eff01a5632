use crate::syntax::ast::*;
use crate::syntax::LineIndex;
use std::collections::VecDeque;

/// Collects every comment in `source`, in order. Comment markers inside
/// string, rune and raw string literals are ignored.
pub fn scan(source: &str) -> Vec<Comment> {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_quoted(bytes, i),
            b'`' => {
                i = bytes[i + 1..]
                    .iter()
                    .position(|&b| b == b'`')
                    .map_or(bytes.len(), |p| i + 1 + p + 1);
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |p| i + p);
                let text = source[i..end].trim_end_matches('\r');
                comments.push(Comment::new(text, Span::new(i, end)));
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = source[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |p| i + 2 + p + 2);
                comments.push(Comment::new(&source[i..end], Span::new(i, end)));
                i = end;
            }
            _ => i += 1,
        }
    }

    comments
}

fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Resolves line numbers across the tree and distributes `comments` onto the
/// nodes they precede.
pub fn attach(file: &mut SourceFile, comments: Vec<Comment>, lines: &LineIndex) {
    let mut attacher = Attacher {
        pending: comments
            .into_iter()
            .map(|mut comment| {
                lines.resolve(&mut comment.span);
                comment
            })
            .collect(),
        lines,
    };
    attacher.file(file);
}

struct Attacher<'a> {
    pending: VecDeque<Comment>,
    lines: &'a LineIndex,
}

impl Attacher<'_> {
    fn take_before(&mut self, offset: usize) -> Vec<Comment> {
        let mut taken = Vec::new();
        while let Some(comment) = self.pending.pop_front() {
            if comment.span.start >= offset {
                self.pending.push_front(comment);
                break;
            }
            taken.push(comment);
        }
        taken
    }

    fn file(&mut self, file: &mut SourceFile) {
        self.lines.resolve(&mut file.package_span);
        file.doc = self.take_before(file.package_span.start);
        for decl in &mut file.decls {
            self.decl(decl);
        }
        file.trailing = self.pending.drain(..).collect();
    }

    fn decl(&mut self, decl: &mut Decl) {
        self.lines.resolve(&mut decl.span);
        decl.leading = self.take_before(decl.span.start);
        let end = decl.span.end;

        match &mut decl.kind {
            DeclKind::Import(group) => {
                for spec in &mut group.specs {
                    self.lines.resolve(&mut spec.span);
                    spec.leading = self.take_before(spec.span.start);
                }
                group.closing = self.take_before(end);
            }
            DeclKind::Const(group) | DeclKind::Var(group) => self.value_group(group, end),
            DeclKind::Type(group) => {
                for spec in &mut group.specs {
                    self.lines.resolve(&mut spec.span);
                    spec.leading = self.take_before(spec.span.start);
                }
                group.closing = self.take_before(end);
            }
            DeclKind::Func(func) => {
                for list in [func.receiver.as_mut(), Some(&mut func.params), func.results.as_mut()]
                    .into_iter()
                    .flatten()
                {
                    self.lines.resolve(&mut list.span);
                }
                self.block(&mut func.body);
            }
        }
    }

    fn value_group(&mut self, group: &mut ValueGroup, end: usize) {
        for spec in &mut group.specs {
            self.lines.resolve(&mut spec.span);
            spec.leading = self.take_before(spec.span.start);
        }
        group.closing = self.take_before(end);
    }

    fn block(&mut self, block: &mut Block) {
        self.lines.resolve(&mut block.span);
        for stmt in &mut block.stmts {
            self.stmt(stmt);
        }
        block.closing = self.take_before(block.span.end);
    }

    fn stmt(&mut self, stmt: &mut Stmt) {
        self.lines.resolve(&mut stmt.span);
        stmt.leading = self.take_before(stmt.span.start);
        let end = stmt.span.end;

        match &mut stmt.kind {
            StmtKind::Var(group) | StmtKind::Const(group) => self.value_group(group, end),
            StmtKind::If {
                init,
                then,
                otherwise,
                ..
            } => {
                if let Some(init) = init {
                    self.stmt(init);
                }
                self.block(then);
                if let Some(otherwise) = otherwise {
                    self.stmt(otherwise);
                }
            }
            StmtKind::For {
                init, post, body, ..
            } => {
                if let Some(init) = init {
                    self.stmt(init);
                }
                if let Some(post) = post {
                    self.stmt(post);
                }
                self.block(body);
            }
            StmtKind::Range { body, .. } => self.block(body),
            StmtKind::Block(block) => self.block(block),
            StmtKind::ShortVarDecl { .. }
            | StmtKind::Assign { .. }
            | StmtKind::IncDec { .. }
            | StmtKind::Expr(_)
            | StmtKind::Return(_)
            | StmtKind::Go(_)
            | StmtKind::Defer(_)
            | StmtKind::Break(_)
            | StmtKind::Continue(_) => {}
        }
    }
}
