// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Log dispatch to stderr with colored level tags.

use colored::{Color, Colorize};
use log::{Level, LevelFilter};

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = record.level();
            let color = match level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Blue,
                Level::Debug => Color::Magenta,
                Level::Trace => Color::Green,
            };
            out.finish(format_args!(
                "{} {}",
                format!("{}:", level.to_string().to_lowercase()).color(color),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
