// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force(color: bool) {
    if color {
        std::env::set_var("COLOR", "1");
        std::env::remove_var("NO_COLOR");
    } else {
        std::env::set_var("NO_COLOR", "1");
        std::env::remove_var("COLOR");
    }
}

fn reset() {
    std::env::remove_var("COLOR");
    std::env::remove_var("NO_COLOR");
}

#[test]
#[serial]
fn no_color_wins_over_color() {
    std::env::set_var("COLOR", "1");
    std::env::set_var("NO_COLOR", "1");
    assert!(!should_colorize());
    reset();
}

#[test]
#[serial]
fn styles_follow_color_setting() {
    let plain = format!("{:?}", Styles::plain());

    force(true);
    assert_ne!(format!("{:?}", styles()), plain);

    force(false);
    assert_eq!(format!("{:?}", styles()), plain);
    reset();
}

#[yare::parameterized(
    header  = { super::header as fn(&str) -> String,  codes::HEADER },
    context = { super::context as fn(&str) -> String, codes::CONTEXT },
    muted   = { super::muted as fn(&str) -> String,   codes::MUTED },
)]
#[serial]
fn painters_wrap_only_when_colored(paint: fn(&str) -> String, code: u8) {
    force(true);
    assert_eq!(paint("mage"), format!("\x1b[38;5;{}mmage\x1b[0m", code));

    force(false);
    assert_eq!(paint("mage"), "mage");
    reset();
}
