use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use dnsname_core::value::{NameInput, Value, flatten_attributes, parse_attributes};
use dnsname_provider_aws::route53::differ::name_kinds_for;
use dnsname_provider_aws::route53::{
    DiffOptions, NameKind, RecordId, clean_record_name, expand_record_name,
    find_changed_name_attributes, normalize_alias_name, normalize_elb_alias_name,
    normalize_name_into_api_representation, normalize_zone_name,
};

#[derive(Parser)]
#[command(name = "dnsname")]
#[command(about = "Normalize domain names the way Route 53 stores them", long_about = None)]
struct Cli {
    /// Show debug logs (otherwise controlled by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a hosted zone name
    Zone {
        name: String,

        /// Parse NAME as a JSON value
        #[arg(long)]
        json: bool,
    },
    /// Normalize an alias target name
    Alias {
        name: String,

        /// Parse NAME as a JSON value
        #[arg(long)]
        json: bool,
    },
    /// Normalize a load balancer alias target (drops the dualstack. label)
    ElbAlias { name: String },
    /// Escape a name into the Route 53 API representation
    Api {
        name: String,

        /// Parse NAME as a JSON value
        #[arg(long)]
        json: bool,
    },
    /// Decode the escapes in a record name returned by the API
    Clean { name: String },
    /// Expand a record name relative to its hosted zone
    Expand {
        name: String,

        /// Hosted zone name
        #[arg(long)]
        zone: String,
    },
    /// Parse a record ID (ZONEID_name_TYPE[_SETID])
    ParseId {
        id: String,

        /// Print the parsed ID as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two names after normalization (exit code 2 if they differ)
    Compare {
        /// Normalization to apply
        #[arg(long, value_enum, default_value_t = Kind::Zone)]
        kind: Kind,

        desired: String,

        current: String,

        /// Parse DESIRED and CURRENT as JSON values
        #[arg(long)]
        json: bool,
    },
    /// Diff two JSON attribute files of a resource (exit code 2 on changes)
    Diff {
        /// Resource the attributes belong to
        #[arg(long, value_enum)]
        resource: ResourceKind,

        /// Desired attributes (JSON object)
        desired: PathBuf,

        /// Current attributes (JSON object)
        current: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Zone,
    Alias,
    Record,
    Api,
}

impl Kind {
    fn name_kind(self) -> NameKind {
        match self {
            Kind::Zone => NameKind::ZoneName,
            Kind::Alias => NameKind::AliasName,
            Kind::Record => NameKind::RecordName,
            Kind::Api => NameKind::ApiRepresentation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    HealthCheck,
    Record,
    Zone,
}

impl ResourceKind {
    fn resource_type(self) -> &'static str {
        match self {
            ResourceKind::HealthCheck => "route53.health_check",
            ResourceKind::Record => "route53.record",
            ResourceKind::Zone => "route53.zone",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Zone { name, json } => {
            read_input(&name, json).map(|input| println!("{}", normalize_zone_name(input)))
        }
        Commands::Alias { name, json } => {
            read_input(&name, json).map(|input| println!("{}", normalize_alias_name(input)))
        }
        Commands::ElbAlias { name } => {
            println!("{}", normalize_elb_alias_name(name));
            Ok(())
        }
        Commands::Api { name, json } => read_input(&name, json)
            .map(|input| println!("{}", normalize_name_into_api_representation(input.as_str()))),
        Commands::Clean { name } => {
            println!("{}", clean_record_name(&name));
            Ok(())
        }
        Commands::Expand { name, zone } => {
            println!("{}", expand_record_name(&name, &zone));
            Ok(())
        }
        Commands::ParseId { id, json } => run_parse_id(&id, json),
        Commands::Compare {
            kind,
            desired,
            current,
            json,
        } => run_compare(kind, &desired, &current, json).map(exit_on_difference),
        Commands::Diff {
            resource,
            desired,
            current,
        } => run_diff(resource, &desired, &current).map(exit_on_difference),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn exit_on_difference(differs: bool) {
    if differs {
        std::process::exit(2);
    }
}

/// Read a command line operand, optionally as a JSON value
///
/// JSON values that are not strings (numbers, null, ...) become absent input.
fn read_input(raw: &str, json: bool) -> Result<NameInput, String> {
    if !json {
        return Ok(NameInput::from(raw));
    }
    let parsed: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("Invalid JSON '{}': {}", raw, e))?;
    let value = Value::from_json(&parsed);
    if !matches!(value, Value::String(_)) {
        log::debug!("{} input normalizes to an empty name", value.type_name());
    }
    Ok(NameInput::from(&value))
}

fn run_parse_id(id: &str, json: bool) -> Result<(), String> {
    let record_id = RecordId::parse(id).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&record_id).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}      {}", "zone_id:".bold(), record_id.zone_id);
    println!("{}         {}", "name:".bold(), record_id.name);
    println!("{}         {}", "type:".bold(), record_id.record_type);
    if let Some(ref set) = record_id.set_identifier {
        println!("{} {}", "set_identifier:".bold(), set);
    }
    Ok(())
}

/// Returns true if the normalized names differ
fn run_compare(kind: Kind, desired: &str, current: &str, json: bool) -> Result<bool, String> {
    let name_kind = kind.name_kind();
    let desired_key = name_kind.normalize(read_input(desired, json)?);
    let current_key = name_kind.normalize(read_input(current, json)?);

    if desired_key == current_key {
        println!("{} {}", "Equal:".green().bold(), desired_key);
        return Ok(false);
    }

    println!("{}", "Different:".red().bold());
    print_value_diff(&current_key, &desired_key);
    Ok(true)
}

/// Returns true if any attribute changed
fn run_diff(resource: ResourceKind, desired: &Path, current: &Path) -> Result<bool, String> {
    let kinds = name_kinds_for(resource.resource_type())
        .ok_or_else(|| format!("No name attributes known for {}", resource.resource_type()))?;
    let desired_attrs = load_attributes(desired)?;
    let current_attrs = load_attributes(current)?;

    let changed = find_changed_name_attributes(
        &desired_attrs,
        &current_attrs,
        &kinds,
        &DiffOptions::default(),
    );

    if changed.is_empty() {
        println!("{}", "No changes.".green().bold());
        return Ok(false);
    }

    let desired_flat = flatten_attributes(&desired_attrs);
    let current_flat = flatten_attributes(&current_attrs);

    println!(
        "{} {}:",
        resource.resource_type().cyan().bold(),
        format!("{} attribute(s) changed", changed.len()).yellow()
    );
    for key in &changed {
        println!("  {} {}", "~".yellow(), key.bold());
        let from = display_attribute(current_flat.get(key));
        let to = display_attribute(desired_flat.get(key));
        print_value_diff(&from, &to);
    }

    Ok(true)
}

fn load_attributes(path: &Path) -> Result<HashMap<String, Value>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_attributes(&content).map_err(|e| format!("{}: {}", path.display(), e))
}

fn display_attribute(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => format!("{:?}", s),
        Some(other) => other.to_json().to_string(),
        None => "(none)".to_string(),
    }
}

fn print_value_diff(from: &str, to: &str) {
    let diff = TextDiff::from_chars(from, to);
    let mut line = String::new();
    for change in diff.iter_all_changes() {
        let text = change.value();
        let rendered = match change.tag() {
            ChangeTag::Delete => text.red().strikethrough(),
            ChangeTag::Insert => text.green(),
            ChangeTag::Equal => text.normal(),
        };
        line.push_str(&rendered.to_string());
    }
    println!("      {}", line);
}
