use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = pathprune::cli::Cli::parse();
    pathprune::init(cli.verbose);
    pathprune::cli::run(cli)
}
