// CLI entry point for illustrating a stored story.
//
// Reads a story draft as JSON (the same `{"title","content","characters"}`
// shape the story generator returns), renders the scene and one portrait per
// character, and writes them as SVG files.
//
// Usage:
//   illustrate <story.json> [OPTIONS]
//     --out <DIR>        Output directory (default: current directory)
//     --seed <N>         Seed for reproducible output (default: OS entropy)
//     --config <FILE>    ArtConfig JSON (default: built-in palette)
//     --whole-words      Match scenery keywords on word boundaries only
//
// Log verbosity follows RUST_LOG (default: info).

use std::path::PathBuf;

use storyloom_art::{ArtConfig, ArtError, Illustrator, KeywordMatching, StoryDraft};
use storyloom_prng::ArtRng;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: illustrate <story.json> [--out DIR] [--seed N] [--config FILE] [--whole-words]";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    story: PathBuf,
    out_dir: PathBuf,
    seed: Option<u64>,
    config: Option<PathBuf>,
    whole_words: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            tracing::error!("{msg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<(), ArtError> {
    let mut config = match &cli.config {
        Some(path) => ArtConfig::load(path)?,
        None => ArtConfig::default(),
    };
    if cli.whole_words {
        config.keyword_matching = KeywordMatching::WholeWord;
    }

    let json = std::fs::read_to_string(&cli.story).map_err(|source| ArtError::Read {
        path: cli.story.clone(),
        source,
    })?;
    let draft = StoryDraft::from_json(&json)?;
    tracing::info!(
        story = %cli.story.display(),
        characters = draft.characters.len(),
        seed = ?cli.seed,
        "illustrating story"
    );

    let mut rng = match cli.seed {
        Some(seed) => ArtRng::new(seed),
        None => ArtRng::from_entropy(),
    };
    let illustrated = Illustrator::new(config).illustrate(&draft, &mut rng);
    for path in illustrated.write_to_dir(&cli.out_dir)? {
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}

/// Parse arguments (without the program name). Uses simple matching, no
/// clap dependency.
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        out_dir: PathBuf::from("."),
        ..CliArgs::default()
    };
    let mut story = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                cli.out_dir = args
                    .get(i)
                    .map(PathBuf::from)
                    .ok_or("--out requires a directory")?;
            }
            "--seed" => {
                i += 1;
                let seed = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .ok_or("--seed requires an unsigned integer")?;
                cli.seed = Some(seed);
            }
            "--config" => {
                i += 1;
                cli.config = Some(
                    args.get(i)
                        .map(PathBuf::from)
                        .ok_or("--config requires a file path")?,
                );
            }
            "--whole-words" => cli.whole_words = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path => {
                if story.is_some() {
                    return Err(format!("unexpected extra argument {path}"));
                }
                story = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    cli.story = story.ok_or("missing story file")?;
    Ok(cli)
}
