fn main() -> anyhow::Result<()> {
    romaneios::app::run()
}
