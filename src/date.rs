/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use jiff::{tz::TimeZone, Timestamp};

pub fn format_date(date: Timestamp, now: Timestamp, tz: &TimeZone) -> String {
    let date = date.to_zoned(tz.clone());
    let today = now.to_zoned(tz.clone()).date();
    let format = if date.date() == today {
        "Today, %H:%M"
    } else if today.yesterday().is_ok_and(|yesterday| yesterday == date.date()) {
        "Yesterday, %H:%M"
    } else {
        "%d. %b %Y, %H:%M"
    };
    date.strftime(format).to_string()
}
