use crate::syntax::ast::*;
use crate::transpiler::errors::{TranspileError, dump};
use crate::transpiler::types::{Storage, map_binding};
use crate::transpiler::writer::CWriter;
use log::{debug, trace};

/// Walks a parsed file and renders its declarations as C.
#[derive(Debug, Default)]
pub struct CCodeGenerator;

impl CCodeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Translates the whole file. Stops at the first unsupported construct;
    /// the partial buffer is dropped with the error.
    pub fn generate(&self, file: &SourceFile) -> Result<String, TranspileError> {
        debug!(
            "generating C for package {} ({} declarations)",
            file.package,
            file.decls.len()
        );

        let mut out = CWriter::new();
        out.comments(&file.doc);
        for decl in &file.decls {
            self.emit_decl(decl, &mut out)?;
        }
        out.comments(&file.trailing);

        Ok(out.finish())
    }

    fn emit_decl(&self, decl: &Decl, out: &mut CWriter) -> Result<(), TranspileError> {
        debug!("line {}: {} declaration", decl.line(), decl.kind.keyword());
        out.comments(&decl.leading);

        match &decl.kind {
            DeclKind::Import(group) => {
                for spec in &group.specs {
                    trace!("skipping import {}", spec.path);
                    out.comments(&spec.leading);
                }
                out.comments(&group.closing);
                Ok(())
            }
            DeclKind::Const(group) => self.emit_values(group, Storage::Const, out),
            DeclKind::Var(group) => self.emit_values(group, Storage::Var, out),
            DeclKind::Type(group) => Err(TranspileError::UnsupportedDecl {
                line: decl.line(),
                dump: dump(group),
            }),
            DeclKind::Func(func) => self.emit_func(decl.line(), func, out),
        }
    }

    fn emit_values(
        &self,
        group: &ValueGroup,
        storage: Storage,
        out: &mut CWriter,
    ) -> Result<(), TranspileError> {
        for spec in &group.specs {
            out.comments(&spec.leading);
            let bindings = spec.bindings().ok_or_else(|| TranspileError::UnsupportedSpec {
                line: spec.span.line,
                dump: dump(spec),
            })?;
            for binding in &bindings {
                out.statement(&map_binding(binding, storage)?.to_string());
            }
        }
        out.comments(&group.closing);
        Ok(())
    }

    fn emit_func(&self, line: usize, func: &FuncDecl, out: &mut CWriter) -> Result<(), TranspileError> {
        if let Some(results) = func.results.as_ref().filter(|_| !func.returns_nothing()) {
            return Err(TranspileError::UnsupportedReturnType {
                line,
                dump: dump(results),
            });
        }
        if let Some(receiver) = &func.receiver {
            return Err(TranspileError::UnsupportedReceiver {
                line,
                dump: dump(receiver),
            });
        }
        if !func.params.fields.is_empty() {
            return Err(TranspileError::UnsupportedParameters {
                line,
                dump: dump(&func.params),
            });
        }

        out.open_function("void", &func.name);
        for stmt in &func.body.stmts {
            out.comments(&stmt.leading);
            self.emit_stmt(stmt, out)?;
        }
        out.comments(&func.body.closing);
        out.close_block();
        Ok(())
    }

    fn emit_stmt(&self, stmt: &Stmt, out: &mut CWriter) -> Result<(), TranspileError> {
        let line = stmt.span.line;
        let unsupported = || TranspileError::UnsupportedStatement {
            line,
            dump: dump(&stmt.kind),
        };

        match &stmt.kind {
            StmtKind::ShortVarDecl { names, values } => {
                if names.len() != values.len() || values.iter().any(|v| v.as_literal().is_none()) {
                    return Err(unsupported());
                }
                for (name, value) in names.iter().zip(values) {
                    let binding = Binding {
                        name,
                        ty: None,
                        value: Some(value),
                        line,
                    };
                    out.statement(&map_binding(&binding, Storage::Var)?.to_string());
                }
                Ok(())
            }
            StmtKind::Var(_)
            | StmtKind::Const(_)
            | StmtKind::Assign { .. }
            | StmtKind::IncDec { .. }
            | StmtKind::Expr(_)
            | StmtKind::Return(_)
            | StmtKind::If { .. }
            | StmtKind::For { .. }
            | StmtKind::Range { .. }
            | StmtKind::Go(_)
            | StmtKind::Defer(_)
            | StmtKind::Break(_)
            | StmtKind::Continue(_)
            | StmtKind::Block(_) => Err(unsupported()),
        }
    }
}
