//! `ucatable config` — Configuration management commands.

use ucatable_config::AppConfig;

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let (mode, diagnostic) = config.mode();
            match diagnostic {
                Some(d) => println!("   ⚠️  {d}"),
                None => println!("   ✅ All checks passed"),
            }

            println!();
            println!("   Mode:      {mode}");
            println!("   Max rows:  {}", config.max_rows);
            println!("   Tense:     {}", config.text.tense);
            println!("   Marker:    {:?}", config.text.draft_marker);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
