//! Object type listing command.

use clap::Args;
use patchkit_core::{NodeCategory, NodeTypeRegistry};

const COLUMNS: usize = 4;
const COLUMN_WIDTH: usize = 20;

#[derive(Args)]
pub struct ListArgs {
    /// Only list types in this category (e.g. "dsp", "midi", "live")
    #[arg(short, long, value_name = "CATEGORY")]
    category: Option<String>,
}

pub fn run(args: ListArgs) -> anyhow::Result<()> {
    let registry = NodeTypeRegistry::builtin();

    if let Some(name) = &args.category {
        let category = NodeCategory::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = NodeCategory::ALL.iter().map(|c| c.name()).collect();
            anyhow::anyhow!("Unknown category: {name} (expected one of: {})", known.join(", "))
        })?;
        let types = registry.types_in_category(category);
        println!("{} ({}):", category.name(), types.len());
        println!();
        print_columns(&types);
        return Ok(());
    }

    let all = registry.list_all();
    println!("Registered Max objects ({}):", all.len());
    println!();
    print_columns(&all);
    Ok(())
}

fn print_columns(names: &[&str]) {
    for row in names.chunks(COLUMNS) {
        let line: String = row
            .iter()
            .map(|name| format!("{name:COLUMN_WIDTH$}"))
            .collect();
        println!("{}", line.trim_end());
    }
}
