//! Bundled device listing command.

#![allow(clippy::print_literal)]

use clap::Args;

use crate::devices::bundled_devices;

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    println!("Bundled Devices");
    println!("===============");
    println!();
    println!("  {:14}  {:14}  {:14}  {}", "Id", "Name", "Kind", "Description");
    println!("  {:14}  {:14}  {:14}  {}", "--", "----", "----", "-----------");

    for device in bundled_devices() {
        println!(
            "  {:14}  {:14}  {:14}  {}",
            device.id,
            device.name,
            device.kind.to_string(),
            device.description
        );
    }

    println!();
    println!("Use 'patchkit build <id>' to write one, or 'patchkit build --all'.");
    Ok(())
}
