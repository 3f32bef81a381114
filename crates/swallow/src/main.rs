use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use swallow_errors::{LineIndex, Renderer};
use swallow_parse::Parse;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
enum Options {
    /// Parse one file and print its diagnostics.
    Parse {
        path: Utf8PathBuf,
        /// Also print the syntax tree.
        #[arg(long)]
        tree: bool,
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// Parse every file and fail if any of them has diagnostics.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Short)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Short,
}

struct SourceFile {
    path: Utf8PathBuf,
    text: String,
    parse: Parse,
}

impl SourceFile {
    fn load(path: &Utf8Path) -> anyhow::Result<Self> {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
        let parse = swallow_parse::parse_source_file(&text);
        tracing::debug!(%path, diagnostics = parse.diagnostics().len(), "parsed");
        Ok(Self { path: path.to_owned(), text, parse })
    }

    fn render(&self, format: Format) -> String {
        let path = self.path.as_str();
        let mut out = String::new();
        match format {
            Format::Pretty => {
                let renderer = Renderer::styled();
                for diagnostic in self.parse.diagnostics() {
                    out.push_str(&format!("{}\n", diagnostic.render(&renderer, path, &self.text)));
                }
            }
            Format::Short => {
                let line_index = LineIndex::new(&self.text);
                for diagnostic in self.parse.diagnostics() {
                    out.push_str(&diagnostic.render_short(path, &line_index));
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SWALLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Options::parse() {
        Options::Parse { path, tree, format } => {
            let file = SourceFile::load(&path)?;
            if tree {
                print!("{}", file.parse.debug_tree());
            }
            eprint!("{}", file.render(format));
            Ok(ExitCode::SUCCESS)
        }
        Options::Check { paths, format } => {
            let files = paths
                .par_iter()
                .map(|path| SourceFile::load(path))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut failed = 0;
            for file in &files {
                if file.parse.has_errors() {
                    failed += 1;
                    eprint!("{}", file.render(format));
                }
            }

            if failed == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{failed} of {} files have errors", files.len());
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
