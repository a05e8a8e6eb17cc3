use console::style;
use log::log_enabled;
use restructure_runner::{clean_logger, cli};

fn main() {
    if let Err(err) = cli::run() {
        // Show the primary error
        let mut chain = err.chain();
        if let Some(primary) = chain.next() {
            if log_enabled!(log::Level::Error) {
                log::error!("{}", style(primary).red());
            } else {
                eprintln!("{} {}", style("Error:").bold().red(), style(primary).red());
            }
        }
        // Show causes in debug mode
        if log_enabled!(log::Level::Debug) {
            for cause in chain {
                log::debug!("Caused by: {cause}");
            }
        }
        clean_logger();
        std::process::exit(1);
    }
}
