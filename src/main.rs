fn main() -> anyhow::Result<()> {
    oasdoc::cli::run_cli()
}
