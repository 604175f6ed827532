use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use shellpack_store::api::{self, Report};
use shellpack_store::{catalog, logging, paths, sources, Settings, Store};
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "shellpack", version, about = "Install, update and run shell packages")]
struct Cli {
    /// Hide progress spinners.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Install one or more packages.
    Install {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Update one package, or check every installed package.
    Update {
        name: Option<String>,
        /// Reinstall even when the versions already match.
        #[arg(long)]
        force: bool,
        /// `all`, `none` or 1-based indices like `1,3` (asked on stdin otherwise).
        #[arg(long)]
        select: Option<String>,
    },
    Uninstall {
        name: String,
    },
    /// Run a package entry: `pkg`, `pkg.file` or `pkg.dir.file`.
    Run {
        address: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
    /// Exit 0 when the address resolves to a runnable file.
    Valid {
        address: String,
    },
    /// List installed packages.
    List,
    Info {
        name: String,
    },
    Version {
        name: String,
    },
    Search {
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Show every package of one source (official by default).
    Browse {
        source: Option<String>,
    },
    /// Manage package sources.
    Src {
        #[command(subcommand)]
        cmd: SrcCmd,
    },
}

#[derive(Debug, Subcommand)]
enum SrcCmd {
    List,
    Add { id: String },
    Remove { id: String },
    /// Curated third-party sources.
    Verified,
}

fn print_report(r: &Report) {
    if r.ok {
        println!("{}", r.message);
    } else {
        eprintln!("{}", r.message);
    }
}

fn code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load_default().context("loading config.json")?;
    let level = settings
        .log_level
        .clone()
        .unwrap_or_else(|| logging::default_log_level().to_string());
    if let Err(e) = logging::init_logging(&level, &paths::logs_dir()) {
        eprintln!("logging disabled: {e}");
    }

    let store = Store::from_settings(&settings)
        .context("setting up package store")?
        .quiet(cli.quiet);

    debug!("command: {:?}", cli.cmd);
    dispatch(&store, cli.cmd)
}

fn dispatch(store: &Store, cmd: Cmd) -> Result<ExitCode> {
    let ok = match cmd {
        Cmd::Install { names } if names.len() == 1 => {
            let r = api::install(store, &names[0]);
            print_report(&r);
            r.ok
        }
        Cmd::Install { names } => {
            let (reports, summary) = api::install_many(store, &names);
            reports.iter().for_each(print_report);
            print_report(&summary);
            summary.ok
        }
        Cmd::Update {
            name: Some(name),
            force,
            ..
        } => {
            let r = api::update_checked(store, &name, force);
            print_report(&r);
            r.ok
        }
        Cmd::Update {
            name: None, select, ..
        } => update_interactive(store, select)?,
        Cmd::Uninstall { name } => {
            let r = api::uninstall(store, &name);
            print_report(&r);
            r.ok
        }
        Cmd::Run { address, args } => {
            let r = api::run(store, &address, &args);
            print_report(&r);
            r.ok
        }
        Cmd::Valid { address } => {
            let r = api::is_valid(store, &address);
            print_report(&r);
            r.ok
        }
        Cmd::List => list_installed(store)?,
        Cmd::Info { name } => {
            let r = api::describe(store, &name);
            print_report(&r);
            r.ok
        }
        Cmd::Version { name } => {
            let r = api::version(store, &name);
            print_report(&r);
            r.ok
        }
        Cmd::Search { terms } => search(store, &terms.join(" ")),
        Cmd::Browse { source } => browse(store, source.as_deref())?,
        Cmd::Src { cmd } => src(store, cmd),
    };
    Ok(code(ok))
}

fn update_interactive(store: &Store, select: Option<String>) -> Result<bool> {
    let (scan, report) = api::check_updates(store);
    print_report(&report);
    let Some(scan) = scan else {
        return Ok(false);
    };
    if scan.outdated.is_empty() {
        return Ok(report.ok);
    }

    for (i, c) in scan.outdated.iter().enumerate() {
        println!(
            "{}. {}: {} -> {}",
            i + 1,
            c.name,
            c.local_version,
            c.remote_version
        );
    }
    if !scan.inconclusive.is_empty() {
        println!("Could not check: {}", scan.inconclusive.join(", "));
    }

    let answer = match select {
        Some(s) => s,
        None => {
            print!("Update which packages? (all, none, or numbers like 1,3): ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("reading selection")?;
            line
        }
    };

    let (reports, summary) = api::apply_updates(store, &scan, &answer);
    reports.iter().for_each(print_report);
    print_report(&summary);
    Ok(summary.ok)
}

fn list_installed(store: &Store) -> Result<bool> {
    let pkgs = catalog::installed(store).map_err(|e| anyhow!("listing packages: {e}"))?;
    if pkgs.is_empty() {
        println!("No packages installed.");
        return Ok(true);
    }
    for p in pkgs {
        let version = p
            .descriptor
            .map(|d| d.version)
            .unwrap_or_else(|| "?".to_string());
        println!("{} ({version}, {} files)", p.name, p.files.len());
    }
    Ok(true)
}

fn search(store: &Store, term: &str) -> bool {
    let hits = catalog::search(store, term);
    if hits.is_empty() {
        eprintln!("No packages matching '{term}'.");
        return false;
    }
    println!("Packages matching '{term}':");
    for h in hits {
        let mark = if h.installed { " [installed]" } else { "" };
        let desc = h.descriptor.map(|d| d.description).unwrap_or_default();
        println!("  {} ({}){mark} {desc}", h.name, h.source);
    }
    true
}

fn browse(store: &Store, source: Option<&str>) -> Result<bool> {
    let source = match source {
        None | Some("official") => store.official().to_string(),
        Some(s) => s.to_string(),
    };
    let rows = catalog::browse(store, &source).map_err(|e| anyhow!("browsing {source}: {e}"))?;
    println!("Packages in {source}:");
    for r in rows {
        let mark = if r.installed { " [installed]" } else { "" };
        let (desc, version) = r
            .descriptor
            .map(|d| (d.description, d.version))
            .unwrap_or_else(|| (String::new(), "?".to_string()));
        println!("  {} {version}{mark} {desc}", r.name);
    }
    Ok(true)
}

fn src(store: &Store, cmd: SrcCmd) -> bool {
    match cmd {
        SrcCmd::List => {
            for (i, s) in sources::list_sources(store).iter().enumerate() {
                let tag = if s.is_official() { " (official)" } else { "" };
                println!("{}. {s}{tag}", i + 1);
            }
            true
        }
        SrcCmd::Add { id } => {
            let r = api::add_source(store, &id);
            print_report(&r);
            r.ok
        }
        SrcCmd::Remove { id } => {
            let r = api::remove_source(store, &id);
            print_report(&r);
            r.ok
        }
        SrcCmd::Verified => {
            let verified = sources::verified_sources();
            if verified.is_empty() {
                println!("No verified sources available.");
            }
            for s in verified {
                println!("  {s}");
            }
            true
        }
    }
}
