fn main() -> anyhow::Result<()> {
    fastlearn_cli::run()
}
