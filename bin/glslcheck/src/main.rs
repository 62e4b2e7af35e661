use std::io::{self, Write, stderr, stdout};
use std::{env, process};

pub mod config;
use compiler_driver::Compiler;
use config::{Config, USAGE};
use log::{debug, info};

fn main() {
    let conf = Config::parse(env::args().skip(1)).unwrap_or_else(|err| {
        eprintln!("{err}\n\n{USAGE}");
        process::exit(2);
    });
    if conf.help {
        println!("{USAGE}");
        return;
    }

    env_logger::Builder::from_default_env()
        .filter_level(conf.log_level())
        .format_timestamp(None)
        .init();

    let mut failed = false;
    if conf.files.is_empty() {
        let comp = Compiler::from_stdin().unwrap_or_else(|err| {
            eprintln!("Error reading stdin: {err}");
            process::exit(1);
        });
        failed |= check(comp, &conf);
    }
    for file in &conf.files {
        let comp = Compiler::from_filename(file).unwrap_or_else(|err| {
            eprintln!("Error reading \"{file}\": {err}");
            process::exit(1);
        });
        failed |= check(comp, &conf);
    }

    if failed {
        process::exit(1);
    }
}

/// Checks a single source. Returns true if it had errors.
fn check(mut comp: Compiler, conf: &Config) -> bool {
    comp = comp.with_builtins(conf.builtins);
    if let Some(variant) = conf.variant {
        comp = comp.with_variant(variant);
    }
    debug!("Variant for {}: {:?}", comp.source().filename(), comp.variant());

    let report = comp.process();
    info!(
        "{}: {} declarations",
        comp.source().filename(),
        report.declarations
    );

    if !conf.quiet
        && let Err(err) = print_report(&comp, &report, conf)
    {
        eprintln!("Error writing output: {err}");
    }
    report.has_errors()
}

fn print_report(comp: &Compiler, report: &compiler_driver::Report, conf: &Config) -> io::Result<()> {
    let source = comp.source();
    if !report.diagnostics.is_empty() {
        let mut err = stderr().lock();
        writeln!(err, "{}:", source.filename())?;
        report.print_diagnostics(source.text(), &mut err)?;
    }
    if conf.outline {
        let mut out = stdout().lock();
        for item in &report.outline {
            writeln!(out, "{}: {item}", source.filename())?;
        }
    }
    Ok(())
}
