use anyhow::Result;
use chrono_tz::Tz;
use eventboard_core::config::EventboardConfig;
use owo_colors::OwoColorize;

pub fn run(config: &EventboardConfig, tz: &Tz) -> Result<()> {
    let config_path = EventboardConfig::config_path()?;
    let events_path = config.events_path();

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!(
        "  Events:     {}{}",
        events_path.display(),
        if events_path.exists() {
            String::new()
        } else {
            format!(" {}", "(missing)".red())
        }
    );

    println!();
    println!("{}", "Settings".bold());
    println!(
        "  Timezone:   {}{}",
        tz.name(),
        if config.timezone.is_none() {
            format!(" {}", "(not set in config)".dimmed())
        } else {
            String::new()
        }
    );

    Ok(())
}
