use narcotk_common::config::Config;

use crate::terminal::print;

pub fn show(cfg: &Config) {
    let entries: Vec<(&'static str, String)> = cfg.entries();
    let key_width: usize = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (key, value) in &entries {
        print::aligned_line(key, value, key_width);
    }
}
