//! svp: parse SystemVerilog expressions, sequences, and properties from the
//! command line and report diagnostics.
//!
//! Usage:
//!   svp expr.sv
//!   svp -e "a + b * c" --dump-tree
//!   svp -e "req ##1 gnt |-> done" --property

use clap::Parser as ClapParser;
use miette::{miette, LabeledSpan, NamedSource, Severity};
use std::fs;
use std::path::PathBuf;
use std::process;
use svparse_ast::writer::SourceWriter;
use svparse_core::arena::CompilationArena;
use svparse_core::intern::StringInterner;
use svparse_diagnostics::{Diagnostic, DiagnosticCategory};
use svparse_parser::Parser;

#[derive(ClapParser, Debug)]
#[command(
    name = "svp",
    about = "svparse - a SystemVerilog expression parser",
    version
)]
struct Cli {
    /// Source file to parse.
    #[arg(value_name = "FILE", conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Parse an inline snippet instead of a file.
    #[arg(short = 'e', long = "expr", value_name = "SOURCE")]
    expr: Option<String>,

    /// Parse the input as a sequence expression.
    #[arg(long, conflicts_with = "property")]
    sequence: bool,

    /// Parse the input as a property expression.
    #[arg(long)]
    property: bool,

    /// Print the parsed syntax tree.
    #[arg(long = "dump-tree")]
    dump_tree: bool,

    /// Print the re-serialized source after parsing.
    #[arg(long = "emit")]
    emit: bool,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
enum CliError {
    #[error("no input: pass a file or use -e")]
    NoInput,
    #[error("failed to read {path}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(&cli) {
        Ok(error_count) => {
            if error_count > 0 {
                1
            } else {
                0
            }
        }
        Err(err) => {
            eprintln!("svp: {:?}", miette::Report::new(err));
            2
        }
    };
    process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<usize, CliError> {
    let (source, input_name) = match (&cli.expr, &cli.file) {
        (Some(text), _) => (text.clone(), "<inline>".to_string()),
        (None, Some(path)) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
            (text, path.display().to_string())
        }
        (None, None) => return Err(CliError::NoInput),
    };

    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, &source);
    let mut writer = SourceWriter::new(&interner);

    if cli.sequence {
        let seq = parser.parse_sequence_expression();
        if cli.dump_tree {
            println!("{:#?}", seq);
        }
        writer.sequence_expr(seq);
    } else if cli.property {
        let prop = parser.parse_property_expression();
        if cli.dump_tree {
            println!("{:#?}", prop);
        }
        writer.property_expr(prop);
    } else {
        let expr = parser.parse_expression();
        if cli.dump_tree {
            println!("{:#?}", expr);
        }
        writer.expression(expr);
    }

    if !parser.is_at_end() {
        let span = parser.remaining_span();
        report(
            &Diagnostic::with_span(span, &svparse_diagnostics::messages::EXTRA_INPUT, &[]),
            &input_name,
            &source,
        );
    }

    for diagnostic in parser.diagnostics().diagnostics() {
        report(diagnostic, &input_name, &source);
    }

    if cli.emit {
        println!("{}", writer.finish());
    }

    let mut error_count = parser.diagnostics().error_count();
    if !parser.is_at_end() {
        error_count += 1;
    }
    Ok(error_count)
}

fn report(diagnostic: &Diagnostic, input_name: &str, source: &str) {
    let severity = match diagnostic.category {
        DiagnosticCategory::Error => Severity::Error,
        DiagnosticCategory::Warning => Severity::Warning,
    };
    let mut labels = Vec::new();
    if let Some(span) = diagnostic.span {
        labels.push(LabeledSpan::at(
            span.to_range(),
            diagnostic.message_text.clone(),
        ));
    }
    for related in &diagnostic.related_information {
        if let Some(span) = related.span {
            labels.push(LabeledSpan::at(span.to_range(), related.message_text.clone()));
        }
    }
    let report = miette!(
        severity = severity,
        code = format!("SV{}", diagnostic.code),
        labels = labels,
        "{}",
        diagnostic.message_text
    )
    .with_source_code(NamedSource::new(input_name, source.to_string()));
    eprintln!("{:?}", report);
}
