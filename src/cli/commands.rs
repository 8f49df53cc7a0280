//! Command dispatch

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::DocumentService;
use crate::application::{parse_bytes, ConfigWriter};
use crate::cli::args::{Cli, Commands, ConfigCommands, ValueType};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::lexical::format_float;
use crate::domain::Node;
use crate::infrastructure::{InfraError, RealFileSystem};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("write help", e))?;
        return Ok(());
    };

    let settings = Settings::load(cli.settings.as_deref())?;
    debug!(?settings, "effective settings");
    let service = DocumentService::new(Arc::new(RealFileSystem), settings.indent);

    match command {
        Commands::Get {
            file,
            path,
            value_type,
            default,
        } => {
            let root = load(&service, file)?;
            get(&root, path, *value_type, default.as_deref(), &settings)
        }
        Commands::Query { file, path, all } => {
            let root = load(&service, file)?;
            query(&root, path, *all, settings.indent)
        }
        Commands::Check { file } => check(&service, file),
        Commands::Fmt {
            file,
            write,
            indent,
        } => {
            let service = DocumentService::new(
                Arc::new(RealFileSystem),
                indent.unwrap_or(settings.indent),
            );
            fmt(&service, file, *write)
        }
        Commands::Tree { file } => {
            let root = load(&service, file)?;
            output::header(&file.display());
            output::info(&root.to_tree());
            Ok(())
        }
        Commands::Config { command } => config(command, &settings),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn is_stdin(file: &Path) -> bool {
    file == Path::new("-")
}

fn read_input(service: &DocumentService, file: &Path) -> CliResult<Vec<u8>> {
    if is_stdin(file) {
        let mut data = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|e| InfraError::io("read stdin", e))?;
        Ok(data)
    } else {
        Ok(service.read(file)?)
    }
}

fn load(service: &DocumentService, file: &Path) -> CliResult<Node> {
    if is_stdin(file) {
        Ok(service.load_reader(io::stdin().lock())?)
    } else {
        Ok(service.load(file)?)
    }
}

#[instrument(skip(root, settings))]
fn get(
    root: &Node,
    path: &str,
    value_type: ValueType,
    default: Option<&str>,
    settings: &Settings,
) -> CliResult<()> {
    let value = match value_type {
        ValueType::String => root.string(path).map(str::to_string),
        ValueType::Bool => root
            .boolean_with(path, &settings.bool_tokens)
            .map(|v| v.to_string()),
        ValueType::Int => root.integer(path).map(|v| v.to_string()),
        ValueType::Float => root.float(path).map(format_float),
    };
    match value.or_else(|| default.map(str::to_string)) {
        Some(value) => {
            output::info(&value);
            Ok(())
        }
        None => Err(CliError::NotFound(path.to_string())),
    }
}

#[instrument(skip(root))]
fn query(root: &Node, path: &str, all: bool, indent: usize) -> CliResult<()> {
    let nodes: Vec<&Node> = if all {
        root.query_all(path)
    } else {
        root.query(path).into_iter().collect()
    };
    debug!("query: {} match(es)", nodes.len());
    if nodes.is_empty() {
        return Err(CliError::NotFound(path.to_string()));
    }

    let stdout = io::stdout();
    let mut writer = ConfigWriter::with_indent(stdout.lock(), indent);
    for node in nodes {
        writer
            .write_node(node)
            .map_err(|e| InfraError::io("write stdout", e))?;
    }
    writer.flush().map_err(|e| InfraError::io("write stdout", e))?;
    Ok(())
}

#[instrument(skip(service))]
fn check(service: &DocumentService, file: &Path) -> CliResult<()> {
    let data = read_input(service, file)?;
    match parse_bytes(&data) {
        Ok(root) => {
            output::success(&format!(
                "{}: {} top-level entries, {} level(s) deep",
                file.display(),
                root.children().len(),
                root.depth() - 1
            ));
            Ok(())
        }
        Err(e) => {
            if let Some((line, column)) = e.position() {
                if let Some(text) = source_line(&data, line) {
                    output::snippet(&text, line, column);
                }
            }
            Err(e.into())
        }
    }
}

/// Text of the 1-based `line`, without its line terminator.
fn source_line(data: &[u8], line: u32) -> Option<String> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    data.split(|&b| b == b'\n').nth(index).map(|raw| {
        String::from_utf8_lossy(raw)
            .trim_end_matches('\r')
            .to_string()
    })
}

#[instrument(skip(service))]
fn fmt(service: &DocumentService, file: &Path, write: bool) -> CliResult<()> {
    if write {
        if is_stdin(file) {
            return Err(CliError::InvalidArgs(
                "--write needs a file path, not stdin".into(),
            ));
        }
        let comments = service.reformat(file)?;
        if comments > 0 {
            output::warning(&format!(
                "{} comment(s) removed from {}",
                comments,
                file.display()
            ));
        }
        output::success(&format!("formatted {}", file.display()));
        return Ok(());
    }

    let root = load(service, file)?;
    let text = service.render(&root)?;
    io::stdout()
        .lock()
        .write_all(text.as_bytes())
        .map_err(|e| InfraError::io("write stdout", e))?;
    Ok(())
}

fn config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no configuration directory available on this system"),
        },
    }
    Ok(())
}
