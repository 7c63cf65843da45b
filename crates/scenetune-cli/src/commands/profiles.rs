use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scenetune_core::profile::ProfileTable;

#[derive(Args)]
pub struct ProfilesArgs {
    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the built-in profile table, ready to edit and pass back
/// through `replay --profiles`.
pub fn run(args: &ProfilesArgs) -> Result<()> {
    let toml_str = toml::to_string_pretty(&ProfileTable::builtin())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write profiles to {}", path.display()))?;
        println!("Profile table saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
