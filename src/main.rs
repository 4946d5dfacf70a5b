use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = callsynth::cli::Cli::parse();
    callsynth::run(cli)
}
