//! The `check` command: validate every kernel of a serialized AST.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use okl_check::{check_kernels, AttributeRegistry, CheckConfig, CheckMode, CheckReport};
use okl_diagnostic::emitter::{
    ColorMode, DiagnosticEmitter, JsonEmitter, SourceView, TerminalEmitter,
};
use okl_diagnostic::Diagnostic;
use okl_ir::{Module, StringInterner};

use super::{EXIT_OK, EXIT_REJECTED, EXIT_USAGE};
use crate::load::load_module;

/// How diagnostics are printed.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable, on stderr.
    #[default]
    Terminal,
    /// A JSON array, on stdout.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "invalid output format `{other}` (expected terminal or json)"
            )),
        }
    }
}

/// Options of `oklc check`.
#[derive(Clone, Debug)]
pub struct CheckOptions {
    pub path: PathBuf,
    pub config: CheckConfig,
    pub format: OutputFormat,
    /// Kernel source the AST was parsed from, for snippets.
    pub source: Option<PathBuf>,
    pub color: ColorMode,
}

/// Parse the arguments following `oklc check`.
pub fn parse_check_options(args: &[String]) -> Result<CheckOptions, String> {
    let mut path = None;
    let mut config = CheckConfig::default();
    let mut format = OutputFormat::default();
    let mut source = None;
    let mut color = ColorMode::default();

    for arg in args {
        if arg == "--all" {
            config.mode = CheckMode::CollectAll;
        } else if arg == "--no-parallel" {
            config.parallel = false;
        } else if let Some(value) = arg.strip_prefix("--format=") {
            format = value.parse()?;
        } else if let Some(value) = arg.strip_prefix("--source=") {
            source = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--color=") {
            color = value.parse()?;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option `{arg}`"));
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }

    let Some(path) = path else {
        return Err("missing AST file".to_string());
    };
    Ok(CheckOptions {
        path,
        config,
        format,
        source,
        color,
    })
}

/// Validate `module` and write its diagnostics to `out`.
pub fn run_check<W: Write>(
    module: &Module,
    interner: &StringInterner,
    options: &CheckOptions,
    source: Option<SourceView>,
    out: W,
    is_tty: bool,
) -> CheckReport {
    let registry = AttributeRegistry::new();
    let report = check_kernels(module, interner, &registry, options.config);
    let diagnostics = report.diagnostics(interner);

    match options.format {
        OutputFormat::Terminal => {
            let mut emitter = TerminalEmitter::with_color_mode(out, options.color, is_tty);
            if let Some(source) = source {
                emitter = emitter.with_source(source);
            }
            emitter.emit_all(&diagnostics);
            let (errors, warnings) = Diagnostic::tally(&diagnostics);
            emitter.emit_summary(errors, warnings);
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(out);
            if let Some(source) = source {
                emitter = emitter.with_source(source);
            }
            emitter.emit_all(&diagnostics);
            emitter.end();
            emitter.flush();
        }
    }
    report
}

fn read_source(path: &Path) -> Result<SourceView, String> {
    std::fs::read_to_string(path)
        .map(|text| SourceView::new(path.display().to_string(), text))
        .map_err(|err| format!("cannot read `{}`: {err}", path.display()))
}

/// Load the AST at `options.path`, validate it and report.
pub fn check_file(options: &CheckOptions) -> i32 {
    let interner = StringInterner::new();
    let module = match load_module(&options.path, &interner) {
        Ok(module) => module,
        Err(err) => {
            eprintln!("error: {err}");
            return EXIT_USAGE;
        }
    };
    let source = match options.source.as_deref().map(read_source).transpose() {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return EXIT_USAGE;
        }
    };

    let report = match options.format {
        OutputFormat::Terminal => {
            let is_tty = std::io::stderr().is_terminal();
            run_check(&module, &interner, options, source, std::io::stderr(), is_tty)
        }
        OutputFormat::Json => {
            run_check(&module, &interner, options, source, std::io::stdout().lock(), false)
        }
    };

    if !report.passed() {
        return EXIT_REJECTED;
    }
    if options.format == OutputFormat::Terminal {
        println!(
            "OK: {} ({} kernels)",
            options.path.display(),
            report.verdicts.len()
        );
    }
    EXIT_OK
}
