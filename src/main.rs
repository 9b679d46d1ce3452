//! Scripted editing session
//!
//! Replays a JSON list of editor messages against a fresh armor-stand
//! animation and writes every export into the output directory.
//!
//! Usage:
//!     stand-animator [OPTIONS] <SCRIPT>
//!
//! Options:
//!     -c, --config <FILE>     Editor config (JSON)
//!     -o, --out <DIR>         Export directory (overrides the config)
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;

use stand_animator::core::{logging, EditorConfig, Error};
use stand_animator::editor::{Editor, EditorMessage, Session};

fn print_help() {
    eprintln!("stand-animator - Scripted armor-stand animation editor");
    eprintln!();
    eprintln!("Usage: stand-animator [OPTIONS] <SCRIPT>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>     Editor config (JSON)");
    eprintln!("    -o, --out <DIR>         Export directory (overrides the config)");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Script example:");
    eprintln!(r#"    [{{"cmd": "set_name", "params": {{"name": "wave"}}}},"#);
    eprintln!(r#"     {{"cmd": "add_keyframe"}},"#);
    eprintln!(r#"     {{"cmd": "update_joint", "params": {{"joint": "right_arm", "axis": "z", "value": 120}}}},"#);
    eprintln!(r#"     {{"cmd": "export"}}]"#);
}

#[derive(Debug)]
struct Args {
    script: PathBuf,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut script: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --config")?;
                config = Some(PathBuf::from(value));
            }
            "-o" | "--out" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --out")?;
                out = Some(PathBuf::from(value));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if script.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                script = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    Ok(Args {
        script: script.ok_or("Missing script file")?,
        config,
        out,
    })
}

async fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(out) = args.out {
        config.export_dir = out;
    }

    let json = std::fs::read_to_string(&args.script)?;
    let messages: Vec<EditorMessage> = serde_json::from_str(&json)
        .map_err(|e| Error::Script(format!("{}: {}", args.script.display(), e)))?;
    log::info!("Replaying {} messages from {}", messages.len(), args.script.display());

    let export_dir = config.export_dir.clone();
    let mut session = Session::new(Editor::new(config)?);
    let mut failures = 0;

    for (step, message) in messages.into_iter().enumerate() {
        match session.handle(message).await {
            Ok(Some(artifact)) => {
                let path = artifact.write_to(&export_dir)?;
                log::info!("Wrote {}", path.display());
            }
            Ok(None) => {}
            Err(e) => {
                // Failed actions leave the session as it was; keep going
                log::warn!("Message {} failed: {}", step, e);
                failures += 1;
            }
        }
    }

    let editor = session.shutdown().await;
    log::info!(
        "Session finished: {} keyframes, {} failed messages",
        editor.state().len(),
        failures
    );
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(args)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
