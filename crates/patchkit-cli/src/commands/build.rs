//! Bundled device build command.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use patchkit_device::SaveOptions;

use crate::devices::{BundledDevice, bundled_devices, find_device};

#[derive(Args)]
pub struct BuildArgs {
    /// Devices to build, by id or name (see `patchkit devices`)
    #[arg(value_name = "DEVICE")]
    names: Vec<String>,

    /// Build every bundled device
    #[arg(short, long, conflicts_with = "names")]
    all: bool,

    /// Output directory (defaults to the User Library folder for each device kind)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print the document to stdout instead of saving it
    #[arg(long, conflicts_with_all = ["all", "out_dir"])]
    stdout: bool,
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let selected = select(&args)?;

    if args.stdout {
        let [entry] = selected.as_slice() else {
            bail!("--stdout takes exactly one device");
        };
        let mut device = (entry.build)().with_context(|| format!("building {}", entry.id))?;
        println!("{}", device.serialize()?);
        return Ok(());
    }

    let mut options = SaveOptions::new();
    if let Some(dir) = &args.out_dir {
        options = options.output_dir(dir.clone());
    }

    for entry in selected {
        tracing::debug!("building {}", entry.id);
        let mut device = (entry.build)().with_context(|| format!("building {}", entry.id))?;
        device
            .save(&options)
            .with_context(|| format!("saving {}", entry.id))?;
    }
    Ok(())
}

fn select(args: &BuildArgs) -> anyhow::Result<Vec<BundledDevice>> {
    if args.all {
        return Ok(bundled_devices());
    }
    if args.names.is_empty() {
        bail!("No devices given. Pass device ids or --all (see 'patchkit devices').");
    }
    args.names
        .iter()
        .map(|name| {
            find_device(name)
                .with_context(|| format!("Unknown device: {name} (see 'patchkit devices')"))
        })
        .collect()
}
