mod args;
mod caret;
mod live;

use anyhow::{Context, Result, bail};
use clap::Parser;
use snapview_config::Config;
use snapview_engine::commands::{update_summary, update_target};
use snapview_engine::debounce::DEFAULT_DEBOUNCE;
use snapview_engine::io::write_html;
use snapview_engine::providers::{
    ComponentPreviewProvider, FileSnapshotProvider, LiveSnapshotProvider,
    SnapshotFilePreviewProvider,
};
use snapview_engine::render::NO_TEST_FOUND;
use snapview_engine::scanning::{find_suite_lenses, find_test_lenses};
use snapview_engine::{
    ContentProvider, PreviewContext, Resolution, Resolver, SnapshotFormatter, UpdateScope,
    build_update_command, parse_passing_count,
};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use crate::args::{CaretArgs, Command, SnapviewArgs};
use crate::caret::caret_offset;
use crate::live::LiveSession;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = SnapviewArgs::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' not found", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };

    let app = App::new(config, &args.root);
    app.run(args.command)
}

struct App {
    config: Config,
    formatter: SnapshotFormatter,
    public_path: PathBuf,
}

impl App {
    fn new(config: Config, root: &Path) -> Self {
        let formatter = SnapshotFormatter::new(config.render_options(root));
        let public_path = config.public_path(root);
        Self {
            config,
            formatter,
            public_path,
        }
    }

    fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Resolve { caret } => {
                let resolution = self.resolve(&caret)?;
                match resolution.location() {
                    Some(location) => println!("{}", serde_json::to_string_pretty(location)?),
                    None => println!("{NO_TEST_FOUND}"),
                }
            }
            Command::Render { caret, out } => {
                let resolution = self.resolve(&caret)?;
                let mut provider = FileSnapshotProvider::new(self.formatter.clone())
                    .with_save_html(self.config.save_html);
                let ctx = PreviewContext::new(Some(caret.file.as_path()), &resolution);
                let html = provider.provide_content(&ctx);
                emit(&html, out.as_deref())?;
            }
            Command::PreviewSnap { file, out } => {
                let mut provider = SnapshotFilePreviewProvider::new(self.formatter.clone());
                let resolution = Resolution::NoTest;
                let ctx = PreviewContext::new(Some(file.as_path()), &resolution);
                let html = provider.provide_content(&ctx);
                emit(&html, out.as_deref())?;
            }
            Command::Story { caret } => {
                let resolution = self.resolve(&caret)?;
                let stylesheet = self.public_path.join("styles").join("luis.css");
                let mut provider = ComponentPreviewProvider::new(
                    self.config.story_server_url.clone(),
                    stylesheet.display().to_string(),
                );
                let ctx = PreviewContext::new(Some(caret.file.as_path()), &resolution);
                println!("{}", provider.provide_content(&ctx));
            }
            Command::Update { caret, suite, run } => self.update(&caret, suite, run)?,
            Command::Lenses { file } => {
                let text = read_source(&file)?;
                let vocabulary = self.config.vocabulary();
                for lens in find_suite_lenses(&text, &vocabulary)
                    .into_iter()
                    .chain(find_test_lenses(&text, &vocabulary))
                {
                    println!(
                        "{}:{}-{} {:?}",
                        lens.line + 1,
                        lens.columns.start + 1,
                        lens.columns.end + 1,
                        lens.kind
                    );
                }
            }
            Command::Live { file } => {
                let provider = LiveSnapshotProvider::new(self.formatter.clone());
                let mut session = LiveSession::new(provider, file, DEFAULT_DEBOUNCE);
                for line in std::io::stdin().lock().lines() {
                    if let Some(html) = session.feed(&line?, Instant::now()) {
                        println!("{html}");
                    }
                }
                println!("{}", session.finish());
            }
        }
        Ok(())
    }

    fn resolve(&self, caret: &CaretArgs) -> Result<Resolution> {
        let text = read_source(&caret.file)?;
        let offset = caret_offset(&text, caret)?;
        let mut resolver = Resolver::new(self.config.vocabulary());
        Ok(resolver.resolve(&text, offset))
    }

    fn update(&self, caret: &CaretArgs, suite: bool, run: bool) -> Result<()> {
        let scope = if suite {
            UpdateScope::File
        } else {
            UpdateScope::Test
        };
        let resolution = self.resolve(caret)?;
        let Some(location) = resolution.location() else {
            bail!("Could not determine the test name");
        };

        let command = build_update_command(
            self.config.update_command(scope),
            scope,
            location,
            &caret.file,
        )?;
        if !run {
            println!("{command}");
            return Ok(());
        }

        let output = process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .output()
            .with_context(|| format!("Failed to run '{command}'"))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
            bail!("'{command}' exited with {}", output.status);
        }

        let target = update_target(scope, location)?;
        match parse_passing_count(&stdout) {
            Some(passing) => println!("{}", update_summary(passing, &target)),
            None => print!("{stdout}"),
        }
        Ok(())
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn emit(html: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            write_html(path, html)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}
