use clap::Parser;

mod runtime;

fn main() -> anyhow::Result<()> {
    runtime::run(runtime::Args::parse())
}
