use clap::Parser;

fn main() -> anyhow::Result<()> {
    selectlist::init();

    let cli = selectlist::app::cli::Cli::parse();
    selectlist::app::cli::run(cli)
}
