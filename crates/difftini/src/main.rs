mod input;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use difftini_syntax::{Builder, Side};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Index syntax trees for structural diffing")]
struct Options {
    /// Log indexing details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index two raw syntax trees (JSON) and print both sides.
    Dump { before: Utf8PathBuf, after: Utf8PathBuf },
    /// Print the comment spans of a raw syntax tree (JSON).
    Comments { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    init_logging(options.verbose);

    match options.command {
        Command::Dump { before, after } => {
            let pair = input::load_pair(&before, &after)?;
            info!(
                lhs = pair.side_len(Side::Lhs),
                rhs = pair.side_len(Side::Rhs),
                "indexed `{before}` against `{after}`"
            );
            print!("{}", pair.debug_tree());
        }
        Command::Comments { path } => {
            let tree = input::read_tree(&path)?;
            let mut builder = Builder::new();
            let roots = builder.build_roots(&tree.roots);
            for span in builder.finish().comment_positions(&roots) {
                println!("{span}");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
