use clap::Parser;
use episodify::cli::{Args, Command, RenameArgs, ScanArgs};
use episodify::encoding::ChardetDetector;
use episodify::library::{run_scan, LibraryLayout, ScanOptions};
use episodify::logging;
use episodify::rename::{rename_show_folder, RenameOptions};
use episodify::ui::{Ui, UiConfig};
use episodify::AppError;
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    debug!(command = ?args.command, "Arguments parsed");

    let mut ui = Ui::new(UiConfig::from_env());

    let code = match args.command {
        Command::Scan(scan) => match run_library_scan(&scan, &mut ui) {
            Ok(()) => 0,
            Err(e) => {
                error!("{}", e);
                eprintln!("\nError: {}", e.detailed_message());
                e.exit_code().into()
            }
        },
        Command::Rename(rename) => run_single_folder(&rename, &mut ui),
    };

    std::process::exit(code);
}

fn run_library_scan(args: &ScanArgs, ui: &mut Ui) -> Result<(), AppError> {
    info!(library = ?args.library_path, "Starting library scan");

    let layout = LibraryLayout::new(&args.library_path);
    let options = ScanOptions {
        skip_confirmation: args.yes,
        default_numbering: args.default_numbering,
    };

    let summary = run_scan(&layout, &options, &ChardetDetector, ui)?;
    debug!(?summary, "Scan complete");

    Ok(())
}

fn run_single_folder(args: &RenameArgs, ui: &mut Ui) -> i32 {
    let options = RenameOptions {
        season: args.season,
        start_episode: args.start_episode,
        skip_confirmation: args.yes,
    };

    let outcome = rename_show_folder(&args.path, &options, &ChardetDetector, ui);
    info!(path = ?args.path, outcome = %outcome, "Rename finished");

    if outcome.is_success() {
        ui.success(outcome.message());
    } else {
        ui.error(&outcome.to_string());
    }

    outcome.code()
}
