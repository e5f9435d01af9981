//! Terminal shell for the external-storage text file.
//!
//! Each invocation opens the main screen, answers the permission prompt when
//! one is raised, runs one action, and prints the resulting notices. `status`
//! and `credits` never open the screen, so they never prompt.

mod prompt_host;

use clap::{Parser, Subcommand};
use exttext_core::{
    default_log_level, init_logging, FsStorageMedium, MainScreen, MenuItem, StoreConfig,
    CREDITS_TEXT,
};
use prompt_host::PromptPermissionHost;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "exttext", version, about = "Append, show, or clear a shared text file")]
struct Cli {
    /// Storage root directory (defaults to $EXTTEXT_STORAGE_DIR or the temp dir).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Write rolling logs into this absolute directory.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Grant the storage permission without prompting.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the file contents.
    Show,
    /// Append TEXT verbatim (no newline added).
    Save { text: String },
    /// Truncate the file to empty.
    Reset,
    /// Append TEXT, then close the session.
    Exit { text: String },
    /// Print medium state, permission, and file location.
    Status,
    /// Print the credits screen.
    Credits,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    match run(cli, &mut stdout, &mut stderr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(stderr, "exttext: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one command. File contents go to `out`, notices to `err`.
fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().as_str().to_string());
        init_logging(&level, log_dir).map_err(|err| err.to_string())?;
    }

    let config = match &cli.root {
        Some(root) => StoreConfig::new(root.clone()),
        None => StoreConfig::from_env(),
    }
    .map_err(|err| err.to_string())?;

    let host = PromptPermissionHost::new(cli.yes);
    let mut screen = MainScreen::new(
        FsStorageMedium::new(config.storage_root()),
        &host,
        config.file_name(),
    );

    match cli.command {
        Command::Credits => {
            screen.select_menu(MenuItem::Credits);
            writeln!(out, "{CREDITS_TEXT}").map_err(write_error)?;
            screen.select_menu(MenuItem::Main);
            return Ok(());
        }
        Command::Status => {
            let gate = screen.gate();
            writeln!(out, "medium_state={}", gate.medium_state().as_str()).map_err(write_error)?;
            writeln!(out, "available={}", gate.is_storage_available()).map_err(write_error)?;
            writeln!(out, "permission={}", gate.has_permission()).map_err(write_error)?;
            writeln!(out, "location={}", screen.store().location()).map_err(write_error)?;
            return Ok(());
        }
        _ => {}
    }

    if screen.open().is_some() {
        if let Some((request_id, granted)) = host.take_answer() {
            screen.on_permission_result(request_id, &[granted]);
            if granted {
                screen.refresh_display();
            }
        }
    }

    match cli.command {
        Command::Show => write!(out, "{}", screen.display()).map_err(write_error)?,
        Command::Save { text } => {
            screen.set_input(text);
            screen.save();
            write!(out, "{}", screen.display()).map_err(write_error)?;
        }
        Command::Reset => screen.reset(),
        Command::Exit { text } => {
            screen.set_input(text);
            screen.save_and_exit();
            write!(out, "{}", screen.display()).map_err(write_error)?;
        }
        Command::Status | Command::Credits => {}
    }

    for notice in screen.take_notices() {
        writeln!(err, "{}", notice.message()).map_err(write_error)?;
    }
    Ok(())
}

fn write_error(err: io::Error) -> String {
    format!("failed to write output: {err}")
}

#[cfg(test)]
mod tests {
    use super::{run, Cli};
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    fn run_args(root: &Path, args: &[&str]) -> (String, String) {
        let root = root.to_str().expect("utf-8 temp path");
        let mut argv = vec!["exttext", "--root", root];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("valid arguments");

        let mut out = Vec::new();
        let mut err = Vec::new();
        run(cli, &mut out, &mut err).expect("command succeeds");
        (
            String::from_utf8(out).expect("utf-8 stdout"),
            String::from_utf8(err).expect("utf-8 stderr"),
        )
    }

    #[test]
    fn show_prints_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("exttest.txt"), "hello\nworld\n").expect("seed file");

        let (out, err) = run_args(dir.path(), &["--yes", "show"]);
        assert_eq!(out, "hello\nworld\n");
        assert_eq!(err, "");
    }

    #[test]
    fn save_appends_verbatim_and_prints_contents() {
        let dir = tempfile::tempdir().expect("temp dir");

        run_args(dir.path(), &["--yes", "save", "t1"]);
        let (out, _) = run_args(dir.path(), &["--yes", "save", "t2"]);

        assert_eq!(out, "t1t2\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("exttest.txt")).expect("file exists"),
            "t1t2"
        );
    }

    #[test]
    fn reset_truncates_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("exttest.txt");
        fs::write(&path, "old").expect("seed file");

        let (out, err) = run_args(dir.path(), &["--yes", "reset"]);
        assert_eq!(out, "");
        assert_eq!(err, "");
        assert_eq!(fs::read_to_string(&path).expect("file kept"), "");
    }

    #[test]
    fn exit_saves_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (out, _) = run_args(dir.path(), &["--yes", "exit", "abc"]);
        assert_eq!(out, "abc\n");
    }

    #[test]
    fn status_reports_without_asking_for_permission() {
        let dir = tempfile::tempdir().expect("temp dir");

        let (out, err) = run_args(dir.path(), &["status"]);
        assert!(out.contains("medium_state=mounted\n"));
        assert!(out.contains("available=true\n"));
        assert!(out.contains("permission=false\n"));
        assert!(out.contains("exttest.txt"));
        assert_eq!(err, "");

        let (out, _) = run_args(dir.path(), &["--yes", "status"]);
        assert!(out.contains("permission=true\n"));
    }

    #[test]
    fn missing_root_reports_storage_problem() {
        let dir = tempfile::tempdir().expect("temp dir");
        let absent = dir.path().join("absent");

        let (out, err) = run_args(&absent, &["--yes", "save", "x"]);
        assert_eq!(out, "");
        assert!(err.ends_with("External memory or permission problem\n"));
        assert!(!absent.exists());
    }

    #[test]
    fn credits_prints_credits_text() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (out, _) = run_args(dir.path(), &["credits"]);
        assert_eq!(out, format!("{}\n", exttext_core::CREDITS_TEXT));
    }
}
