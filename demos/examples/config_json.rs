// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading popover options from JSON.
//!
//! Keys are camelCase and every key is optional.
//!
//! Run:
//! - `cargo run -p tether_demos --example config_json`

use tether_popover::PopoverConfig;

const OPTIONS: &str = r#"{
    "trigger": "click",
    "position": "center top",
    "alternativePositions": ["center bottom", "right center"],
    "offsetY": 6,
    "popoverClass": "tooltip dark",
    "allowParallelUse": false,
    "disposable": true,
    "labelPolicy": "followApplied"
}"#;

fn main() {
    let config: PopoverConfig = match serde_json::from_str(OPTIONS) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid options: {err}");
            return;
        }
    };
    println!("{config:#?}");
    println!("group: {:?}", config.effective_group());
    println!("classes: {:?}", config.popover_classes().collect::<Vec<_>>());

    match serde_json::to_string_pretty(&PopoverConfig::legacy()) {
        Ok(json) => println!("legacy profile:\n{json}"),
        Err(err) => eprintln!("cannot serialize: {err}"),
    }
}
