pub mod build;
pub mod cli;
pub mod codegen;
pub mod model;
pub mod names;
pub mod optimize;
pub mod parse;
pub mod path_de;
pub mod resolve;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    cli::CommandLineInterface::load().run()
}
