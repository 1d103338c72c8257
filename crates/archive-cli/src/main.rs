//! archive-rs: list, read and extract comic archives and PDFs.
//!
//! Archives (cbz/cbr/cb7/cbt, zip/rar/7z/tar) are read through the `7z`
//! binary; PDFs through lopdf, with pages rendered by `pdftoppm`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use archive_7z::{SevenZip, SevenZipArchive};
use archive_core::{ArchiveFormat, ArchiveOptions, ArchiveReader};
use archive_pdf::{ArchivePdf, PageRenderer, PdfArchive};

#[derive(Parser)]
#[command(
    name = "archive-rs",
    version,
    about = "Read comic book archives and PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Archive binary to use (default: 7z)
    #[arg(long, global = true)]
    seven_zip: Option<String>,

    /// PDF page renderer binary (default: pdftoppm)
    #[arg(long, global = true)]
    renderer: Option<String>,

    /// Rendering DPI for PDF pages (default: 300)
    #[arg(long, global = true)]
    dpi: Option<u32>,

    /// Raster format for rendered PDF pages (default: jpg)
    #[arg(long, global = true)]
    format: Option<String>,

    /// List dotfiles and __MACOSX entries too
    #[arg(long, global = true)]
    keep_hidden: bool,

    /// Dump effective merged config as TOML and exit
    #[arg(long, global = true)]
    dump_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the external tools are installed
    Check,

    /// List the files of an archive (pages for a PDF)
    List { input: PathBuf },

    /// Print metadata as JSON
    Info { input: PathBuf },

    /// Read a single entry; prints base64 when no output is given
    Content {
        input: PathBuf,
        entry: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract some entries, or all of them when none are named
    Extract {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        entries: Vec<String>,
    },

    /// Render a PDF page (the cover by default)
    Cover {
        input: PathBuf,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Print raw image bytes instead of base64 text
        #[arg(long)]
        raw: bool,

        /// Image file to write; the page is printed to stdout otherwise
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Load config from global and project-local TOML files.
/// Later files override earlier ones. Missing files are silently ignored.
fn load_config() -> ArchiveOptions {
    let mut opts = ArchiveOptions::default();

    // 1. Global config: ~/.config/archive-rs/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("archive-rs").join("config.toml");
        if let Some(parsed) = read_config(&global_path) {
            opts = parsed;
        }
    }

    // 2. Project-local config: ./.archive-rs.toml
    if let Some(parsed) = read_config(Path::new(".archive-rs.toml")) {
        opts = parsed;
    }

    opts
}

fn read_config(path: &Path) -> Option<ArchiveOptions> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ArchiveOptions>(&contents) {
        Ok(parsed) => {
            log::debug!("Loaded config from {}", path.display());
            Some(parsed)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides when the CLI flag was explicitly provided.
fn apply_cli_overrides(opts: &mut ArchiveOptions, cli: &Cli) {
    if cli.verbose > 0 {
        opts.verbose = cli.verbose;
    }

    if let Some(ref binary) = cli.seven_zip {
        opts.seven_zip_binary = binary.clone();
    }

    if let Some(ref binary) = cli.renderer {
        opts.renderer_binary = binary.clone();
    }

    if let Some(dpi) = cli.dpi {
        opts.render_dpi = dpi.max(1);
    }

    if let Some(ref format) = cli.format {
        opts.image_format = format.to_lowercase();
    }

    if cli.keep_hidden {
        opts.skip_hidden = false;
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut options = load_config();
    apply_cli_overrides(&mut options, &cli);

    // Handle --dump-config
    if cli.dump_config {
        match toml::to_string_pretty(&options) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    let Some(command) = cli.command else {
        eprintln!("Usage: archive-rs <command> [options]");
        eprintln!("   or: archive-rs --help");
        process::exit(1);
    };

    if let Err(e) = run(command, &options) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(command: Commands, options: &ArchiveOptions) -> Result<()> {
    match command {
        Commands::Check => check_tools(options),
        Commands::List { input } => {
            let reader = open_reader(&input, options)?;
            for entry in reader.files() {
                let size = archive_utils::bytes_to_human(entry.size).unwrap_or_else(|| "-".into());
                println!("{}\t{}", entry.path, size);
            }
            log::info!("{} files in {}", reader.count(), input.display());
            Ok(())
        }
        Commands::Info { input } => print_info(&input, options),
        Commands::Content {
            input,
            entry,
            output,
        } => {
            let reader = open_reader(&input, options)?;
            let found = reader
                .find(&entry)
                .with_context(|| format!("No entry named `{}` in {}", entry, input.display()))?;
            let data = reader.content(found)?;
            match output {
                Some(path) => {
                    archive_utils::write_bytes(&data, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => println!("{}", archive_utils::encode_base64(&data)),
            }
            Ok(())
        }
        Commands::Extract {
            input,
            output,
            entries,
        } => {
            let reader = open_reader(&input, options)?;
            let paths = if entries.is_empty() {
                reader.extract_all(&output)?
            } else {
                let selected = entries
                    .iter()
                    .map(|name| {
                        reader
                            .find(name)
                            .with_context(|| format!("No entry named `{}` in {}", name, input.display()))
                    })
                    .collect::<Result<Vec<_>>>()?;
                reader.extract(&output, &selected)?
            };
            for path in &paths {
                println!("{}", path.display());
            }
            log::info!("Extracted {} files to {}", paths.len(), output.display());
            Ok(())
        }
        Commands::Cover {
            input,
            index,
            raw,
            output,
        } => render_cover(&input, index, raw, output.as_deref(), options),
    }
}

fn check_tools(options: &ArchiveOptions) -> Result<()> {
    let mut missing = 0;

    match SevenZip::from_options(options) {
        Ok(seven_zip) => println!("ok\t{}", seven_zip.binary()),
        Err(e) => {
            println!("missing\t{}", e);
            missing += 1;
        }
    }

    match PageRenderer::from_options(options) {
        Ok(renderer) => println!("ok\t{} ({} DPI)", renderer.binary(), renderer.dpi()),
        Err(e) => {
            println!("missing\t{}", e);
            missing += 1;
        }
    }

    if missing > 0 {
        bail!("{} external tool(s) missing", missing);
    }
    Ok(())
}

/// Open `input` with the reader matching its extension.
///
/// The archive binary is probed here, once per run, before any archive
/// operation.
fn open_reader(input: &Path, options: &ArchiveOptions) -> Result<Box<dyn ArchiveReader>> {
    let format = ArchiveFormat::from_path(input)
        .with_context(|| format!("Cannot detect archive format of {}", input.display()))?;

    match format {
        ArchiveFormat::Pdf => Ok(Box::new(PdfArchive::open(input, options)?)),
        _ => {
            let seven_zip = SevenZip::from_options(options)?;
            Ok(Box::new(SevenZipArchive::open(&seven_zip, input, options)?))
        }
    }
}

fn print_info(input: &Path, options: &ArchiveOptions) -> Result<()> {
    let format = ArchiveFormat::from_path(input)
        .with_context(|| format!("Cannot detect archive format of {}", input.display()))?;

    let info = if format == ArchiveFormat::Pdf {
        let pdf = ArchivePdf::open(input)?;
        let mut document = pdf.to_map();
        // Full text is too long for a summary
        document.remove("text");
        document.insert("version".into(), pdf.version().into());
        serde_json::json!({
            "mime": format.mime_type(),
            "document": document,
            "metadata": pdf.metadata().to_map(),
        })
    } else {
        let seven_zip = SevenZip::from_options(options)?;
        let archive = SevenZipArchive::open(&seven_zip, input, options)?;
        serde_json::json!({
            "path": input.display().to_string(),
            "format": archive.format(),
            "mime": format.mime_type(),
            "extension": archive.extension(),
            "count": archive.count(),
            "images": archive.images().len(),
            "size": archive_utils::bytes_to_human(archive.total_size()),
        })
    };

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn render_cover(
    input: &Path,
    index: usize,
    raw: bool,
    output: Option<&Path>,
    options: &ArchiveOptions,
) -> Result<()> {
    let pdf = ArchivePdf::open(input)?;
    let renderer = PageRenderer::from_options(options)?;
    let base64 = options.base64 && !raw;

    let content = pdf.extract(&renderer, index, &options.image_format, base64)?;

    match output {
        // Files always get the decoded image; base64 is a stdout format
        Some(path) => {
            content
                .write_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote page {} of {} to {}", index, pdf, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if content.is_base64() {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
