use anyhow::Result;

fn main() -> Result<()> {
    if !sheetcheck::cli::run()? {
        std::process::exit(1);
    }
    Ok(())
}
