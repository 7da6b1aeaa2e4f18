use anyhow::Result;
use bayou::ui::cli::drivers::InquireDriver;
use bayou::ui::cli::wizard;

fn main() -> Result<()> {
    wizard::run(&InquireDriver)
}
