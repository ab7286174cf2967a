// src/main.rs
// =============================================================================
// Entry point of the crawl-map CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the handler of the chosen subcommand
// 3. Print a table (or JSON with --json)
// 4. Exit with a meaningful code (0 = success, 1 = capture failed, 2 = error)
// =============================================================================

mod api;     // src/api/ - archive service client
mod cli;     // src/cli.rs - command-line parsing
mod graph;   // src/graph/ - crawl graph model and reduction
mod layout;  // src/layout/ - the layout engine

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;

use api::{ArchiveClient, JobState, SiteSummary, SnapshotInfo, POLL_INTERVAL};
use cli::{Cli, Commands, LayoutArgs, ServiceArgs};
use graph::Graph;
use layout::{compute_layout, Layout, LayoutConfig};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected errors exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = done
//   Ok(1) = a capture finished with an error status
//   Err   = anything else went wrong
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { file, output } => {
            if !output.json {
                println!("📂 Reading graph: {}", file.display());
            }
            let graph = Graph::from_file(&file)?;
            print_layout(&graph, &output, None)
        }
        Commands::Map { host, ts, output, service } => {
            handle_map(&host, &ts, &output, &service).await
        }
        Commands::Archive { url, depth, max_pages, no_wait, service } => {
            handle_archive(&url, depth, max_pages, no_wait, &service).await
        }
        Commands::Sites { json, with_snapshots, service } => {
            handle_sites(json, with_snapshots, &service).await
        }
        Commands::Snapshots { host, json, service } => {
            handle_snapshots(&host, json, &service).await
        }
        Commands::Delete { host, ts, all, service } => {
            handle_delete(host.as_deref(), ts.as_deref(), all, &service).await
        }
    }
}

// Handles the 'map' subcommand: fetch a stored graph, then lay it out
async fn handle_map(host: &str, ts: &str, output: &LayoutArgs, service: &ServiceArgs) -> Result<i32> {
    let client = ArchiveClient::new(&service.api_base)?;
    if !output.json {
        println!("🔍 Fetching crawl graph: {} @ {}", host, ts);
    }

    let graph = client.fetch_graph(host, ts).await?;
    let page = client.page_url(host, ts)?;
    print_layout(&graph, output, Some(page.as_str()))
}

// Computes the layout and prints it as JSON or as a summary
fn print_layout(graph: &Graph, output: &LayoutArgs, page_url: Option<&str>) -> Result<i32> {
    let config = LayoutConfig::default().with_max_nodes(output.max_nodes);
    let layout = compute_layout(graph, &config);

    if layout.truncated > 0 {
        eprintln!(
            "⚠️  Graph has {} node(s); showing the first {} ({} left out)",
            graph.nodes.len(),
            config.max_nodes,
            layout.truncated
        );
    }

    if output.json {
        println!("{}", layout.to_json(output.paths)?);
    } else {
        print_layout_table(&layout);
        if let Some(url) = page_url {
            println!("🔗 Captured page: {}", url);
        }
    }
    Ok(0)
}

// Prints a layout as a human-readable table in the terminal
fn print_layout_table(layout: &Layout) {
    if layout.is_empty() {
        println!("⚠️  No graph data found. Try running a new capture first.");
        return;
    }

    match &layout.root {
        Some(root) => println!("🌱 Root: {}", root),
        None => println!("🌱 No root detected; showing grouped layers."),
    }
    println!(
        "🗺️  {} page(s), {} link(s) on a {}x{} canvas\n",
        layout.positions.len(),
        layout.edges.len(),
        layout.width,
        layout.height
    );

    println!("{:<8} {:<42} {:>8} {:>8}", "LEVEL", "PAGE", "X", "Y");
    println!("{}", "=".repeat(69));

    for (level, members) in &layout.levels().buckets {
        for id in members {
            if let Some(pos) = layout.positions.get(id) {
                println!("{:<8} {:<42} {:>8.1} {:>8.1}", level, pos.label, pos.x, pos.y);
            }
        }
    }

    println!();
    println!("📊 Levels:");
    for level in layout.summary() {
        let note = if level.unreachable { " (not reachable from root)" } else { "" };
        println!("   {}: {} page(s){}", level.level, level.nodes, note);
    }
}

// Handles the 'archive' subcommand: submit a capture and follow it
async fn handle_archive(
    url: &str,
    depth: u32,
    max_pages: Option<u32>,
    no_wait: bool,
    service: &ServiceArgs,
) -> Result<i32> {
    let client = ArchiveClient::new(&service.api_base)?;

    println!("🔍 Starting capture for {}", url);
    let job_id = client.start_archive(url, depth, max_pages).await?;
    println!("📄 Job {} started", job_id);

    if no_wait {
        return Ok(0);
    }

    let last = client
        .wait_for_job(&job_id, POLL_INTERVAL, |status| {
            println!("   Status: {}", status.describe());
        })
        .await?;

    match last.status {
        JobState::Success => {
            let host = last.host.as_deref().unwrap_or("?");
            println!("✅ Capture finished for {} ({} page(s))", host, last.pages());
            if let (Some(host), Some(ts)) = (last.host.as_deref(), last.ts.as_deref()) {
                println!("   Next: crawl-map map {} {}", host, ts);
            }
            Ok(0)
        }
        JobState::Error => {
            let reason = last.error.as_deref().unwrap_or("unknown error");
            println!("❌ Capture failed: {}", reason);
            Ok(1)
        }
        JobState::Running => Err(anyhow!("Job {} stopped polling while still running", job_id)),
    }
}

// One host with its snapshot listing, for `sites --with-snapshots --json`
#[derive(Serialize)]
struct SiteReport {
    #[serde(flatten)]
    site: SiteSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    captures: Option<Vec<SnapshotInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// Handles the 'sites' subcommand
async fn handle_sites(json: bool, with_snapshots: bool, service: &ServiceArgs) -> Result<i32> {
    let client = ArchiveClient::new(&service.api_base)?;
    let sites = client.list_sites().await?;

    if !with_snapshots {
        if json {
            println!("{}", serde_json::to_string_pretty(&sites)?);
        } else {
            print_sites_table(&sites);
        }
        return Ok(0);
    }

    let reports: Vec<SiteReport> = client
        .list_sites_with_snapshots(sites)
        .await
        .into_iter()
        .map(|(site, listing)| match listing {
            Ok(captures) => SiteReport { site, captures: Some(captures), error: None },
            Err(e) => SiteReport { site, captures: None, error: Some(format!("{:#}", e)) },
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_sites_table(std::slice::from_ref(&report.site));
            match (&report.captures, &report.error) {
                (Some(captures), _) => print_snapshots_table(&client, captures),
                (None, Some(error)) => eprintln!("   Warning: could not list captures: {}", error),
                (None, None) => {}
            }
            println!();
        }
    }
    Ok(0)
}

fn print_sites_table(sites: &[SiteSummary]) {
    if sites.is_empty() {
        println!("No archived sites yet");
        return;
    }

    println!("{:<40} {:>10} {:<25}", "HOST", "SNAPSHOTS", "LAST CAPTURED");
    println!("{}", "=".repeat(77));
    for site in sites {
        println!(
            "{:<40} {:>10} {:<25}",
            site.host,
            site.snapshots,
            site.last_started.as_deref().unwrap_or("None")
        );
    }
}

// Handles the 'snapshots' subcommand
async fn handle_snapshots(host: &str, json: bool, service: &ServiceArgs) -> Result<i32> {
    let client = ArchiveClient::new(&service.api_base)?;
    let snapshots = client.list_snapshots(host).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        println!("📋 Captures of {}", host);
        print_snapshots_table(&client, &snapshots);
    }
    Ok(0)
}

fn print_snapshots_table(client: &ArchiveClient, snapshots: &[SnapshotInfo]) {
    if snapshots.is_empty() {
        println!("   No captures");
        return;
    }

    println!("   {:<20} {:<10} {:>7} {:>12}  {}", "TIMESTAMP", "STATUS", "PAGES", "BYTES", "PAGE");
    for snap in snapshots {
        let page = client
            .page_url(&snap.host, &snap.ts)
            .map(|u| u.to_string())
            .unwrap_or_default();
        println!(
            "   {:<20} {:<10} {:>7} {:>12}  {}",
            snap.ts,
            snap.status.as_deref().unwrap_or("?"),
            snap.count_fetched,
            snap.bytes_stored,
            page
        );
        if let Some(error) = &snap.error {
            println!("      ❌ {}", error);
        }
    }
}

// Handles the 'delete' subcommand
async fn handle_delete(host: Option<&str>, ts: Option<&str>, all: bool, service: &ServiceArgs) -> Result<i32> {
    let client = ArchiveClient::new(&service.api_base)?;

    match (host, ts, all) {
        (_, _, true) => {
            client.delete_all().await?;
            println!("🗑️  All snapshots deleted.");
        }
        (Some(host), Some(ts), false) => {
            client.delete_snapshot(host, ts).await?;
            println!("🗑️  Deleted capture {} of {}", ts, host);
        }
        (Some(host), None, false) => {
            client.delete_site(host).await?;
            println!("🗑️  Deleted every capture of {}", host);
        }
        (None, _, false) => return Err(anyhow!("Pass a host, or --all")),
    }
    Ok(0)
}
