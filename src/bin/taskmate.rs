use anyhow::Result;

fn main() -> Result<()> {
    taskmate::cli::run()
}
