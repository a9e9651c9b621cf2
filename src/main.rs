use std::{error::Error, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use clock_desk::{
    config::Config,
    registration::store::SheetClient,
    ClockWidget, RegistrationForm,
};
use eframe::{egui::ViewportBuilder, run_native};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// the clock, stopwatch and alarms (default)
    Clock,
    /// the registration form
    Register,
    /// write the default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    if let Err(e) = simple_file_logger::init_logger!("clock_desk") {
        eprintln!("couldn't initialize logger: {e:?}");
    }

    let args = Args::parse();
    let config_path = match args.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    match args.command.unwrap_or(Command::Clock) {
        Command::Init { force } => {
            if force || !config_path.exists() {
                Config::new().save(&config_path)?;
                log::info!("wrote default config to {}", config_path.display());
                println!("wrote {}", config_path.display());
            } else {
                println!(
                    "{} already exists, pass --force to overwrite it",
                    config_path.display()
                );
            }
            Ok(())
        }
        Command::Clock => {
            let config = Config::load_or_default(&config_path)?;
            let native_options = eframe::NativeOptions {
                viewport: ViewportBuilder::default().with_inner_size([480.0, 420.0]),
                ..Default::default()
            };
            run_native(
                "Clock",
                native_options,
                Box::new(|cc| Ok(Box::new(ClockWidget::new(config, Some(cc.egui_ctx.clone()))))),
            )
            .map_err(Into::into)
        }
        Command::Register => {
            let config = Config::load_or_default(&config_path)?;
            let store = Arc::new(SheetClient::new(config.registration.endpoint.clone())?);
            let native_options = eframe::NativeOptions {
                viewport: ViewportBuilder::default().with_inner_size([420.0, 640.0]),
                ..Default::default()
            };
            run_native(
                "Registration Form",
                native_options,
                Box::new(|cc| {
                    Ok(Box::new(RegistrationForm::new(
                        store,
                        config.registration.allowed_domains,
                        config.theme,
                        Some(cc.egui_ctx.clone()),
                    )))
                }),
            )
            .map_err(Into::into)
        }
    }
}
