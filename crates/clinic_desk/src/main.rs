use app::AppBuilder;
use clap::Parser;
use clinic_desk::cli::Cli;
use clinic_desk::event_loop::DeskLoop;
use clinic_desk::settings::{build_desk_settings_store, DeskConfig};
use clinic_desk::{errors, ClinicDesk};
use color_eyre::eyre::eyre;
use color_eyre::Result;

#[tokio::main]
pub async fn main() -> Result<()> {
    errors::init()?;
    let args = Cli::parse();
    let context = AppBuilder::<ClinicDesk>::new(env!("CARGO_PKG_VERSION"))
        .build()
        .map_err(|err| eyre!("initialisation failed: {err}"))?;

    let settings_file = args
        .settings
        .clone()
        .unwrap_or_else(|| context.path_context().settings_file());
    let store = build_desk_settings_store(settings_file)?;
    let config = DeskConfig::resolve(&args, &store)?;

    DeskLoop::new(config).run().await
}
