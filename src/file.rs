// src/file.rs
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::ast::Ast;
use crate::config::consts::PRETTY_INDENT;
use crate::config::options::OutputOptions;

/// Write `ast` where `output` says; returns the file written, `None` for stdout.
pub fn write_ast(ast: &Ast, output: &OutputOptions) -> io::Result<Option<PathBuf>> {
    match &output.path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_directory(parent)?;
                }
            }
            write_json(BufWriter::new(File::create(path)?), ast, output.pretty)?;
            Ok(Some(path.clone()))
        }
        None => {
            write_json(io::stdout().lock(), ast, output.pretty)?;
            Ok(None)
        }
    }
}

/// Compact JSON, or four-space indented when `pretty`; always newline-terminated.
pub fn write_json<W: Write>(mut writer: W, ast: &Ast, pretty: bool) -> io::Result<()> {
    if pretty {
        let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(PRETTY_INDENT));
        ast.serialize(&mut ser)?;
    } else {
        serde_json::to_writer(&mut writer, ast)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
