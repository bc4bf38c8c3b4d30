use solarium::{calc, cli, domain, subcommands};

fn main() {
    let config = match cli::parse_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let solar_calculations = calc::SunCalculations::new(config.date, config.coordinates);

    let result = match config.action {
        domain::Action::Report { json } => subcommands::display_report(solar_calculations, json),
        domain::Action::Poll { watch, json } => subcommands::poll(solar_calculations, watch, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
