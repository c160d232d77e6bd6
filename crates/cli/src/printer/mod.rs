use std::io::{self, Write};
use std::path::Path;

use filedock_fs::{FileInfo, FileRecord, format_size, format_timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Whether to print the count/size summary after the rows.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct PrintContext<'a> {
    /// Label for this listing, e.g. "scan" or "stat"
    pub kind: &'a str,
    /// Scan root, when the rows came from a folder scan
    pub root: Option<&'a Path>,
    /// Number of records
    pub total: usize,
    /// Sum of record sizes
    pub total_bytes: u64,
}

impl<'a> PrintContext<'a> {
    pub fn for_records(kind: &'a str, root: Option<&'a Path>, records: &[FileRecord]) -> Self {
        Self {
            kind,
            root,
            total: records.len(),
            total_bytes: records.iter().map(|r| r.size).sum(),
        }
    }
}

/// Streams file records to an output.
pub trait RecordPrinter {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;

    fn print_record(&mut self, rec: &FileRecord, ctx: &PrintContext) -> io::Result<()>;

    /// Called once after all rows are printed; footers and summaries go here.
    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        // Generic writers can't be probed for a TTY, so Auto means no color here.
        let use_color = cfg.color == ColorChoice::Always;

        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    #[inline]
    fn format_path(&self, path: &Path) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", path.display())
        } else {
            path.display().to_string()
        }
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

pub fn make_printer(cfg: PrinterConfig) -> Box<dyn RecordPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
    }
}

impl<W: Write, E: Write> RecordPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if let Some(root) = ctx.root {
            writeln!(self.err, "[{}] {}", ctx.kind, root.display())?;
        }
        Ok(())
    }

    fn print_record(&mut self, rec: &FileRecord, _ctx: &PrintContext) -> io::Result<()> {
        let shown = rec.relative_path.as_deref().unwrap_or(rec.path.as_path());
        writeln!(
            self.out,
            "{:>10}  {}  {}",
            format_size(rec.size),
            format_timestamp(&rec.timestamps.modified),
            self.format_path(shown)
        )
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            writeln!(
                self.err,
                "\n[{}] {} files, {}",
                ctx.kind,
                ctx.total,
                format_size(ctx.total_bytes)
            )?;
        }
        Ok(())
    }
}

impl<W: Write, E: Write> RecordPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_record(&mut self, rec: &FileRecord, ctx: &PrintContext) -> io::Result<()> {
        let mut obj = serde_json::to_value(rec).map_err(io::Error::other)?;
        obj["kind"] = serde_json::Value::from(ctx.kind);
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "kind": ctx.kind,
                "root": ctx.root,
                "total": ctx.total,
                "totalBytes": ctx.total_bytes,
            });
            writeln!(self.err, "{}", obj)?;
        }
        Ok(())
    }
}

/// Print the extended single-file answer.
pub fn write_file_info<W: Write>(out: &mut W, info: &FileInfo, format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        let obj = serde_json::to_value(info).map_err(io::Error::other)?;
        return writeln!(out, "{}", obj);
    }

    let kind = if info.is_directory {
        "directory"
    } else if info.is_file {
        "file"
    } else {
        "other"
    };

    writeln!(out, "path:        {}", info.path.display())?;
    writeln!(out, "name:        {}", info.name)?;
    writeln!(out, "extension:   {}", info.extension)?;
    writeln!(out, "type:        {}", kind)?;
    writeln!(out, "size:        {} ({} bytes)", info.size_formatted, info.size)?;
    writeln!(out, "created:     {}", info.formatted.created)?;
    writeln!(out, "modified:    {}", info.formatted.modified)?;
    writeln!(out, "accessed:    {}", info.formatted.accessed)?;
    writeln!(out, "changed:     {}", info.formatted.changed)?;
    if let Some(mode) = &info.permissions {
        writeln!(out, "permissions: {}", mode)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
