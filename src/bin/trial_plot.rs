use log::{error, info};
use trial_plot::plot::parse_cli;

fn main() {
    let (config, verbose) = match parse_cli() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    info!(
        "compare {} vs {} over {} file(s) and plot to {}",
        config.x_axis,
        config.y_axis,
        config.sources.len(),
        config.output.display()
    );
    if let Err(e) = trial_plot::run(&config) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
