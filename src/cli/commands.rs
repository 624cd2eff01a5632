use crate::cli::args::{Cli, Commands};
use crate::transpiler::{parse_source, transpile, transpile_source};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::debug;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("goc v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Transpile { input, output } => {
            transpile_command(&input, output.as_deref(), cli.verbose)
        }
        Commands::Parse { input, output_ast } => parse_command(&input, output_ast),
        Commands::Check { inputs } => check_command(&inputs),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Translates `input`. With `output`, the file is only created when the
/// whole unit translated.
pub fn transpile_command(input: &Path, output: Option<&Path>, verbose: bool) -> Result<()> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;

    match output {
        Some(path) => {
            let mut code = Vec::new();
            transpile(&mut code, file)
                .with_context(|| format!("Failed to transpile {}", input.display()))?;
            fs::write(path, &code)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            if verbose {
                println!("✅ Wrote {} bytes to {}", code.len(), path.display());
            }
        }
        None => {
            transpile(io::stdout().lock(), file)
                .with_context(|| format!("Failed to transpile {}", input.display()))?;
        }
    }

    Ok(())
}

pub fn parse_command(input: &Path, output_ast: bool) -> Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let file = parse_source(&source)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    println!("✅ Successfully parsed {}", input.display());
    println!("📦 Package: {}", file.package);

    let count = |keyword: &str| {
        file.decls
            .iter()
            .filter(|decl| decl.kind.keyword() == keyword)
            .count()
    };
    println!("📥 Imports: {}", file.imports().count());
    println!("🔒 Const declarations: {}", count("const"));
    println!("📊 Var declarations: {}", count("var"));
    println!("🧩 Type declarations: {}", count("type"));
    println!("🔧 Functions: {}", file.functions().count());

    if output_ast {
        println!("\n--- AST ---");
        println!("{}", serde_json::to_string_pretty(&file)?);
    }

    Ok(())
}

pub fn check_command(inputs: &[PathBuf]) -> Result<()> {
    let mut failed = 0;

    for input in inputs {
        let result = fs::read_to_string(input)
            .map_err(anyhow::Error::from)
            .and_then(|source| transpile_source(&source).map_err(anyhow::Error::from));
        match result {
            Ok(code) => println!("✅ {} ({} bytes of C)", input.display(), code.len()),
            Err(err) => {
                failed += 1;
                println!("❌ {}: {}", input.display(), err);
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} files failed to transpile", failed, inputs.len()));
    }
    Ok(())
}
