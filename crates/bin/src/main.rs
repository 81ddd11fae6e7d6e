use clap::Parser;
use sodality::Instance;
use sodality::backend::JsonFile;
use tracing_subscriber::EnvFilter;

mod cli;
mod shell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sodality=info".parse().unwrap()),
        )
        .init();

    let cli = cli::Cli::parse();
    let mut instance = Instance::open(Box::new(JsonFile::new(&cli.data_file)));

    shell::run(&mut instance)?;

    // Persistence failures are reported, never fatal.
    if !cli.no_save {
        if let Err(e) = instance.save() {
            tracing::error!("failed to save snapshot: {e}");
        }
    }
    Ok(())
}
