//! Command-line interface for the sitenav binary.
//!
//! The CLI validates a site document, prints the assembled configuration as
//! JSON for the site generator, or shows the sidebar as an outline.

use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use sitenav::{
    ConfigError, FsAssetResolver, LoadOptions, SiteConfig, build_site, diagnose_site,
    document_root, load_site, output_error, read_document,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for validating documentation sidebars.
#[derive(Debug, Parser,)]
#[command(name = "sitenav", version, about = "Validate and normalize documentation sidebars")]
struct Cli
{
    /// Enable informational logging.
    #[arg(long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Report every problem in a site document.
    Check(SiteArgs,),
    /// Print the assembled site configuration as JSON.
    Render(RenderArgs,),
    /// Print the validated sidebar as an indented outline.
    Tree(SiteArgs,),
}

#[derive(Debug, Args,)]
/// Arguments shared by every subcommand.
struct SiteArgs
{
    /// Path to the YAML site document.
    #[arg(long = "config", value_name = "PATH")]
    config: PathBuf,

    /// Deepest sidebar level allowed, overriding the document.
    #[arg(long = "max-depth", value_name = "N", env = "SITENAV_MAX_DEPTH")]
    max_depth: Option<usize,>,
}

impl SiteArgs
{
    fn load_options(&self,) -> LoadOptions
    {
        LoadOptions {
            max_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `render` subcommand.
struct RenderArgs
{
    #[command(flatten)]
    site: SiteArgs,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info",)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),)
    };
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();

    if let Err(error,) = run(cli.command,) {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the parsed subcommand.
///
/// # Errors
///
/// Propagates errors originating from loading, validation and output.
fn run(command: Command,) -> Result<(), ConfigError,>
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Check(args,) => run_check(&args, &mut out, &mut io::stderr(),),
        Command::Render(args,) => run_render(&args, &mut out,),
        Command::Tree(args,) => run_tree(&args, &mut out,),
    }
}

/// Prints every problem to `err`, or a one-line summary to `out`.
///
/// # Errors
///
/// Returns a validation error counting the problems when any were found.
fn run_check<O, E,>(args: &SiteArgs, out: &mut O, err: &mut E,) -> Result<(), ConfigError,>
where
    O: Write,
    E: Write,
{
    let document = read_document(&args.config,)?;
    let resolver = FsAssetResolver::new(document_root(&args.config,),);
    let options = args.load_options();

    let problems = diagnose_site(&document, &resolver, &options,)?;
    if !problems.is_empty() {
        for problem in &problems {
            writeln!(err, "{}", problem.to_display_string()).map_err(output_error,)?;
        }
        return Err(ConfigError::validation(format!(
            "{} problem(s) found in {}",
            problems.len(),
            args.config.display()
        ),),);
    }

    let site = build_site(document, &resolver, &options,)?;
    info!("{} passed all checks", args.config.display());
    writeln!(
        out,
        "ok: {} ({} pages, depth {})",
        site.title(),
        site.sidebar().leaf_count(),
        site.sidebar().depth()
    )
    .map_err(output_error,)
}

fn run_render<W: Write,>(args: &RenderArgs, out: &mut W,) -> Result<(), ConfigError,>
{
    let site = load_site(&args.site.config, &args.site.load_options(),)?;
    write_site(out, &site, args.pretty,)
}

fn run_tree<W: Write,>(args: &SiteArgs, out: &mut W,) -> Result<(), ConfigError,>
{
    let site = load_site(&args.config, &args.load_options(),)?;
    out.write_all(site.sidebar().outline().as_bytes(),).map_err(output_error,)
}

fn write_site<W: Write,>(writer: &mut W, site: &SiteConfig, pretty: bool,) -> Result<(), ConfigError,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, site,)?;
    } else {
        serde_json::to_writer(writer, site,)?;
    }

    Ok((),)
}
