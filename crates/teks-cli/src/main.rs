use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::PathBuf;
use std::{env, io, process};
use teks_buffer::{Buffer, NewlineStyle, read_line};
use teks_config::{Config, NewlinePreference};
use teks_document::Document;

const USAGE: &str = "usage: teks-cli <file> [--line N] [--convert lf|crlf|cr] [--output PATH]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    file: PathBuf,
    line: Option<usize>,
    convert: Option<NewlineStyle>,
    output: Option<PathBuf>,
}

fn parse_style(value: &str) -> Result<NewlineStyle> {
    match value.to_ascii_lowercase().as_str() {
        "lf" => Ok(NewlineStyle::Lf),
        "crlf" => Ok(NewlineStyle::Crlf),
        "cr" => Ok(NewlineStyle::Cr),
        other => bail!("unknown newline style '{other}', expected lf, crlf or cr"),
    }
}

fn style_name(style: NewlineStyle) -> &'static str {
    match style {
        NewlineStyle::Lf => "LF",
        NewlineStyle::Crlf => "CRLF",
        NewlineStyle::Cr => "CR",
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut file = None;
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--line" => {
                let value = args.next().context("--line needs a line number")?;
                parsed.line = Some(
                    value
                        .parse::<usize>()
                        .with_context(|| format!("invalid line number '{value}'"))?,
                );
            }
            "--convert" => {
                let value = args.next().context("--convert needs a newline style")?;
                parsed.convert = Some(parse_style(&value)?);
            }
            "--output" => {
                let value = args.next().context("--output needs a path")?;
                parsed.output = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            path => {
                if file.is_some() {
                    bail!("only one file may be given");
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    parsed.file = file.context(USAGE)?;
    if parsed.output.is_some() && parsed.convert.is_none() {
        bail!("--output requires --convert");
    }
    Ok(parsed)
}

fn describe(
    document: &Document,
    preference: NewlinePreference,
    out: &mut impl Write,
) -> Result<()> {
    let buffer = document.buffer();
    let styles: Vec<_> = document
        .newline_styles()
        .iter()
        .map(style_name)
        .collect();

    if let Some(path) = document.path() {
        writeln!(out, "path:     {}", path.display())?;
    }
    writeln!(out, "bytes:    {}", buffer.size().raw())?;
    writeln!(out, "lines:    {}", buffer.line_count())?;
    if styles.is_empty() {
        writeln!(out, "newlines: none")?;
    } else {
        writeln!(out, "newlines: {}", styles.join(", "))?;
    }
    writeln!(
        out,
        "save as:  {}",
        style_name(preference.resolve(document.preferred_newline()))
    )?;
    Ok(())
}

fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let preference = match Config::load() {
        Ok(Some(config)) => config.newline,
        Ok(None) => NewlinePreference::default(),
        Err(e) => {
            log::warn!("Failed to load config: {e}");
            NewlinePreference::default()
        }
    };
    run_with(args, preference, out)
}

fn run_with(args: Args, preference: NewlinePreference, out: &mut impl Write) -> Result<()> {
    let mut document = Document::open_file(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    if let Some(line) = args.line {
        let Some(content) = read_line(document.buffer(), line) else {
            bail!(
                "line {line} is out of range, document has {} lines",
                document.buffer().line_count()
            );
        };
        out.write_all(&content)?;
        out.write_all(b"\n")?;
        return Ok(());
    }

    if let Some(style) = args.convert {
        match args.output {
            Some(output) => document.save_as(output, style)?,
            None => document.save(style)?,
        }
        log::info!("converted newlines to {}", style_name(style));
    }

    describe(&document, preference, out)
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let stdout = io::stdout();
    if let Err(e) = run(args, &mut stdout.lock()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
