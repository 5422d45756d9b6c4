use std::io::{self, Write};

use valet_core::Paths;

const EXAMPLE_CONFIG: &str = r#"{
  "memory": {
    "summaryMaxEntries": 10,
    "summaryMinImportance": 2
  },
  "smartHome": {
    "bridgeUrl": null,
    "apiToken": null
  },
  "reports": {
    "outputDir": null
  }
}
"#;

pub async fn run(force: bool) -> anyhow::Result<()> {
    let paths = Paths::new();

    if paths.config_file().exists() && !force {
        print!("Config already exists. Overwrite? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    paths.ensure_dirs()?;
    std::fs::write(paths.config_file(), EXAMPLE_CONFIG)?;

    println!("✓ Created config: {}", paths.config_file().display());
    println!("✓ Created workspace: {}", paths.workspace().display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to configure the smart-home bridge", paths.config_file().display());
    println!("  2. Run `valet status` to verify configuration");
    println!("  3. Run `valet run \"write report about ...\"` to try a skill");

    Ok(())
}
