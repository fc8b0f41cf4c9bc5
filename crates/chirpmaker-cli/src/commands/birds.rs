//! Birds command implementation
//!
//! Lists the profiles of a registry.

use anyhow::Result;
use chirpmaker_core::profile::Call;
use chirpmaker_core::Registry;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::load_registry;

/// Run the birds command
///
/// # Arguments
/// * `profiles` - Optional JSON registry replacing the built-in profiles
/// * `json` - Print the registry as JSON instead of a table
pub fn run(profiles: Option<&Path>, json: bool) -> Result<ExitCode> {
    let registry = load_registry(profiles)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {} profiles", "Birds:".cyan().bold(), registry.len());
    for line in describe(&registry) {
        println!("  {}", line);
    }
    Ok(ExitCode::SUCCESS)
}

/// One line per profile: id, name, call kinds and repetitions.
pub fn describe(registry: &Registry) -> Vec<String> {
    registry
        .iter()
        .map(|(id, profile)| {
            let kinds: Vec<&str> = profile
                .calls
                .iter()
                .map(|call| match call {
                    Call::Chirp(chirp) => chirp.scale.name(),
                    Call::Phaser(_) => "phaser",
                })
                .collect();
            let mut line = format!("{:>2}  {:<10} {}", id, profile.name, kinds.join(", "));
            if profile.repeat > 1 {
                line.push_str(&format!(" (x{})", profile.repeat));
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_builtin() {
        let lines = describe(&Registry::builtin());
        assert_eq!(lines.len(), 15);
        assert!(lines[0].starts_with(" 0  bird0"));
        assert!(lines[11].contains("cuckoo"));
        assert!(lines[11].ends_with("(x4)"));
    }
}
