use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".cohesionmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Cohesionmap Configuration

[thresholds]
# Minimum instance fields before a type is scored
min_fields = 5
# Minimum candidate methods before a type is scored
min_methods = 5
# Fraction of disjoint method pairs above which a type is flagged
# (comparison is strict: exactly this value does not flag)
disjoint_ratio = 0.5

[ignore]
patterns = [
    "target/**",
    "**/generated/**",
]

[output]
default_format = "terminal"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .cohesionmap.toml configuration file");

    Ok(())
}
