use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(cfg: &Config) -> AppResult<()> {
    if cfg.outcomes.is_empty() {
        warning("No outcome labels configured; any text is accepted.");
        return Ok(());
    }
    for (i, label) in cfg.outcomes.labels().iter().enumerate() {
        println!("{:>2}. {}", i + 1, label);
    }
    Ok(())
}
