fn main() -> anyhow::Result<()> {
    mhgmd::cli::run_cli()
}
